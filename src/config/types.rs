//! Supporting types for the lfslock configuration.

use crate::template::{FILE_PATH, ROOT_PATH};
use serde::{Deserialize, Serialize};

pub use crate::pool::DispatchPolicy;

/// Default number of lock commands allowed to run at once.
pub const DEFAULT_POOL_CAPACITY: usize = 128;

/// Config file looked up at the repository root when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = ".lfslock.yaml";

/// Default exclude globs applied when a directory is expanded.
pub fn default_exclude() -> Vec<String> {
    vec!["**/.git/**".to_string()]
}

/// External command templates.
///
/// Templates use the `<root path>` and `<file path>` placeholders. Unknown
/// fields are ignored and missing fields fall back to the stock `git lfs`
/// invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTemplates {
    /// Prints the absolute repository root. Takes no placeholders.
    pub repo_root: String,
    /// Prints the origin remote URL.
    pub origin_url: String,
    /// Lists every lock, one `<path>\t<owner>\t<id>` line per lock.
    pub list_locks: String,
    /// Lists locks matching a single path.
    pub query_lock: String,
    pub lock: String,
    pub lock_force: String,
    pub unlock: String,
    pub unlock_force: String,
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            repo_root: "git rev-parse --show-toplevel".to_string(),
            origin_url: format!("git -C {ROOT_PATH} remote get-url origin"),
            list_locks: format!("git -C {ROOT_PATH} lfs locks"),
            query_lock: format!("git -C {ROOT_PATH} lfs locks --path={FILE_PATH}"),
            lock: format!("git -C {ROOT_PATH} lfs lock {FILE_PATH}"),
            lock_force: format!("git -C {ROOT_PATH} lfs lock -f {FILE_PATH}"),
            unlock: format!("git -C {ROOT_PATH} lfs unlock {FILE_PATH}"),
            unlock_force: format!("git -C {ROOT_PATH} lfs unlock -f {FILE_PATH}"),
        }
    }
}

impl CommandTemplates {
    /// All templates paired with their config key, for validation messages.
    pub fn named(&self) -> [(&'static str, &str); 8] {
        [
            ("repo_root", self.repo_root.as_str()),
            ("origin_url", self.origin_url.as_str()),
            ("list_locks", self.list_locks.as_str()),
            ("query_lock", self.query_lock.as_str()),
            ("lock", self.lock.as_str()),
            ("lock_force", self.lock_force.as_str()),
            ("unlock", self.unlock.as_str()),
            ("unlock_force", self.unlock_force.as_str()),
        ]
    }
}
