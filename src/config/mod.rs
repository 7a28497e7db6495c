//! Configuration for lfslock.
//!
//! Settings live in an optional `.lfslock.yaml` at the repository root (or a
//! file passed with `--config`). Every field has a default, so an absent or
//! empty file yields the stock `git lfs` behavior.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{CONFIG_FILE_NAME, CommandTemplates, DEFAULT_POOL_CAPACITY, DispatchPolicy};
