//! Operation kinds and batch outcomes.

use crate::config::CommandTemplates;

/// A lock-state change dispatched once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lock,
    Unlock,
}

impl Operation {
    /// Prefix the LFS command prints when the operation succeeds.
    pub fn success_marker(self) -> &'static str {
        match self {
            Operation::Lock => "Locked ",
            Operation::Unlock => "Unlocked ",
        }
    }

    /// Classify raw command output.
    ///
    /// Success means the output begins with [`Self::success_marker`]; no
    /// trimming is applied.
    pub fn succeeded(self, output: &str) -> bool {
        output.starts_with(self.success_marker())
    }

    /// The command template for this operation.
    pub fn template(self, commands: &CommandTemplates, forced: bool) -> &str {
        match (self, forced) {
            (Operation::Lock, false) => &commands.lock,
            (Operation::Lock, true) => &commands.lock_force,
            (Operation::Unlock, false) => &commands.unlock,
            (Operation::Unlock, true) => &commands.unlock_force,
        }
    }

    /// Verb used in progress output ("Lock", "Unlock").
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Lock => "Lock",
            Operation::Unlock => "Unlock",
        }
    }

    /// Past tense used in progress output ("Locked", "Unlocked").
    pub fn past_tense(self) -> &'static str {
        match self {
            Operation::Lock => "Locked",
            Operation::Unlock => "Unlocked",
        }
    }
}

/// Aggregate outcome of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchResult {
    /// Number of paths in the batch.
    pub total: usize,
    /// Number of paths whose command printed the success marker.
    pub succeeded: usize,
}

impl BatchResult {
    /// True when every path succeeded. An empty batch is a success.
    pub fn is_success(&self) -> bool {
        self.succeeded == self.total
    }

    pub fn failed(&self) -> usize {
        self.total.saturating_sub(self.succeeded)
    }
}
