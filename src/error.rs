//! Error types for the lfslock CLI.
//!
//! Only the ambient layers (configuration, repository discovery, dispatch)
//! return errors. Lock operations themselves report outcomes as booleans and
//! counts.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lfslock.
#[derive(Error, Debug)]
pub enum LfsLockError {
    /// User provided invalid arguments or the system is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The Git repository could not be located.
    #[error("Repository error: {0}")]
    RepoError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LfsLockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LfsLockError::UserError(_) | LfsLockError::Io(_) => exit_codes::USER_ERROR,
            LfsLockError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            LfsLockError::RepoError(_) => exit_codes::REPO_ERROR,
        }
    }
}

/// Result type alias for lfslock operations.
pub type Result<T> = std::result::Result<T, LfsLockError>;
