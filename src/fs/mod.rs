//! Filesystem helpers for lfslock.
//!
//! Turns user-supplied paths into the normalized, repository-relative file
//! lists that lock commands operate on.

mod expand;
mod paths;

pub use expand::{build_exclude_set, expand_files};
pub use paths::{full_path, is_directory, normalize_path, relative_to_root};
