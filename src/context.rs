//! Repository context resolution for lfslock.
//!
//! Finds the current directory, the Git repository root, and the origin URL
//! before any lock command runs. Discovery goes through the configured
//! command templates and the injected [`CommandRunner`], like every other
//! external call.

use crate::config::CommandTemplates;
use crate::error::{LfsLockError, Result};
use crate::fs::{full_path, normalize_path};
use crate::runner::CommandRunner;
use crate::template::{ROOT_PATH, render};
use std::path::Path;
use tracing::info;

/// Resolved locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    /// Absolute, normalized working directory.
    pub current_dir: String,
    /// Absolute, normalized repository root.
    pub root: String,
    /// URL of the `origin` remote; empty when there is none.
    pub origin_url: String,
}

impl RepoContext {
    /// Build a context for an already discovered root.
    pub fn with_root(
        runner: &dyn CommandRunner,
        commands: &CommandTemplates,
        root: String,
    ) -> Result<Self> {
        let current_dir = full_path(".")?;
        let origin_url = origin_url(runner, commands, &root);

        Ok(Self {
            current_dir,
            root,
            origin_url,
        })
    }

    /// Print the context header shown before every command.
    pub fn print_summary(&self) {
        println!("Current Path: [{}]", self.current_dir);
        println!("Root Path: [{}]", self.root);
        println!("Origin URL: [{}]", self.origin_url);
    }
}

/// Run the `repo_root` template and validate what it printed.
///
/// # Returns
///
/// * `Ok(String)` - The normalized absolute repository root
/// * `Err(LfsLockError::RepoError)` - If the command printed nothing or
///   something that is not an existing directory
pub fn discover_root(runner: &dyn CommandRunner, commands: &CommandTemplates) -> Result<String> {
    let output = runner.run_capture(&commands.repo_root);
    let root = normalize_path(&output);

    if root.is_empty() {
        return Err(LfsLockError::RepoError(
            "not inside a git repository. Run this command from within a git repository."
                .to_string(),
        ));
    }

    if !Path::new(&root).is_dir() {
        return Err(LfsLockError::RepoError(format!(
            "could not determine the repository root.\n\
             Command: {}\n\
             Output: {}",
            commands.repo_root,
            output.trim()
        )));
    }

    info!(root = root.as_str(), "resolved repository root");
    Ok(root)
}

/// URL of the `origin` remote, trimmed. Empty if the command fails.
pub fn origin_url(runner: &dyn CommandRunner, commands: &CommandTemplates, root: &str) -> String {
    let command = render(&commands.origin_url, &[(ROOT_PATH, root)]);
    runner.run_capture(&command).trim().to_string()
}
