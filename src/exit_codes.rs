//! Exit code constants for the lfslock CLI.
//!
//! - 0: Success (including batches where some files failed)
//! - 1: User error (bad arguments, invalid state)
//! - 2: Usage error (reported by clap before any command runs)
//! - 3: Configuration error
//! - 4: Repository discovery failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid state.
pub const USER_ERROR: i32 = 1;

/// Command line could not be parsed. clap exits with this code itself.
pub const USAGE_ERROR: i32 = 2;

/// Configuration file could not be read, parsed, or validated.
pub const CONFIG_ERROR: i32 = 3;

/// Repository root could not be discovered.
pub const REPO_ERROR: i32 = 4;
