//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for lfslock.
///
/// This struct represents the contents of `.lfslock.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External command templates.
    #[serde(default)]
    pub commands: CommandTemplates,

    /// Maximum number of lock/unlock commands running at once.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,

    /// How a full pool admits the next command.
    #[serde(default)]
    pub dispatch: DispatchPolicy,

    /// Globs of repository-relative paths skipped when a directory is expanded.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commands: CommandTemplates::default(),
            pool_capacity: default_pool_capacity(),
            dispatch: DispatchPolicy::default(),
            exclude: default_exclude(),
        }
    }
}

fn default_pool_capacity() -> usize {
    DEFAULT_POOL_CAPACITY
}
