//! Git LFS lock orchestration.
//!
//! Every operation follows the same pattern: render a command template for
//! each file, run the commands through a bounded [`TaskPool`](crate::pool::TaskPool),
//! classify each output by its success marker, and tally the results.
//!
//! # Progress Output
//!
//! Batches report to a [`Progress`] sink:
//! - `Lock List: <path>` for every input path, before dispatch
//! - `Locked File: <path>` or `Lock Failed: <path>` plus the raw command output
//! - `Lock Result: <total> / <succeeded>` once the batch has drained
//!
//! Unlock batches use the same shapes with `Unlock`/`Unlocked`. Lines from
//! different files within one wave appear in completion order.

mod orchestrator;
mod progress;
mod types;


pub use orchestrator::LockOrchestrator;
pub use progress::Progress;
pub use types::{BatchResult, Operation};
