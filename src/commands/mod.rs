//! Command implementations for lfslock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command first opens a [`Session`]: the repository
//! context, the loaded config, and an orchestrator wired to the process
//! runner.

mod lock;
mod query;

use crate::cli::{Cli, Command};
use crate::config::{CONFIG_FILE_NAME, CommandTemplates, Config};
use crate::context::{RepoContext, discover_root};
use crate::error::{LfsLockError, Result};
use crate::fs::full_path;
use crate::locks::{LockOrchestrator, Operation};
use crate::runner::{CommandRunner, ShellRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs once the repository is known.
pub(crate) struct Session {
    pub config: Config,
    /// Config file actually read, if any.
    pub config_source: Option<PathBuf>,
    pub context: RepoContext,
    pub orchestrator: LockOrchestrator,
}

impl Session {
    /// Resolve the repository and load the config.
    ///
    /// With an explicit config file its `repo_root` template is used for
    /// discovery. Otherwise the root is found with the default templates and
    /// `<root>/.lfslock.yaml` is loaded if present.
    pub fn open(runner: Arc<dyn CommandRunner>, config_path: Option<&Path>) -> Result<Self> {
        let (config, config_source, root) = match config_path {
            Some(path) => {
                let config = Config::load(path)?;
                let root = discover_root(runner.as_ref(), &config.commands)?;
                (config, Some(path.to_path_buf()), root)
            }
            None => {
                let root = discover_root(runner.as_ref(), &CommandTemplates::default())?;
                let config = Config::load_from_root(&root)?;
                let candidate = Path::new(&root).join(CONFIG_FILE_NAME);
                let source = candidate.is_file().then_some(candidate);
                (config, source, root)
            }
        };

        let context = RepoContext::with_root(runner.as_ref(), &config.commands, root)?;
        let orchestrator = LockOrchestrator::new(&config, runner)?;

        Ok(Self {
            config,
            config_source,
            context,
            orchestrator,
        })
    }

    pub fn root(&self) -> &str {
        &self.context.root
    }
}

/// Absolute form of a path argument.
fn resolve_target(path: &str) -> Result<String> {
    if path.trim().is_empty() {
        return Err(LfsLockError::UserError("path must not be empty".to_string()));
    }
    full_path(path)
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. The repository
/// context is printed before the command runs.
pub fn dispatch(cli: Cli) -> Result<()> {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new());
    let session = Session::open(runner, cli.config.as_deref())?;
    session.context.print_summary();

    debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Command::Lock(args) => lock::cmd_path(&session, Operation::Lock, false, &args.path),
        Command::LockForce(args) => lock::cmd_path(&session, Operation::Lock, true, &args.path),
        Command::Unlock(args) => lock::cmd_path(&session, Operation::Unlock, false, &args.path),
        Command::UnlockForce(args) => {
            lock::cmd_path(&session, Operation::Unlock, true, &args.path)
        }
        Command::UnlockAll => lock::cmd_unlock_all(&session, false, None),
        Command::UnlockForceAll => lock::cmd_unlock_all(&session, true, None),
        Command::UnlockAllOwner(args) => {
            lock::cmd_unlock_all(&session, false, Some(&args.owner))
        }
        Command::UnlockForceAllOwner(args) => {
            lock::cmd_unlock_all(&session, true, Some(&args.owner))
        }
        Command::Locks(args) => query::cmd_locks(&session, args.owner.as_deref(), args.json),
        Command::Status(args) => query::cmd_status(&session, &args.path),
        Command::Info => query::cmd_info(&session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchPolicy;
    use crate::fs::normalize_path;
    use crate::test_support::FakeRunner;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, String) {
        let temp_dir = TempDir::new().unwrap();
        let root = normalize_path(&temp_dir.path().to_string_lossy());
        (temp_dir, root)
    }

    #[test]
    fn open_without_config_file_uses_defaults() {
        let (_temp_dir, root) = temp_root();
        let runner = FakeRunner::new().respond("git rev-parse --show-toplevel", &root);

        let session = Session::open(Arc::new(runner), None).unwrap();

        assert_eq!(session.root(), root);
        assert_eq!(session.config, Config::default());
        assert!(session.config_source.is_none());
    }

    #[test]
    fn open_loads_config_from_root() {
        let (temp_dir, root) = temp_root();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "pool_capacity: 4\ndispatch: sliding_window\n",
        )
        .unwrap();
        let runner = FakeRunner::new().respond("git rev-parse --show-toplevel", &root);

        let session = Session::open(Arc::new(runner), None).unwrap();

        assert_eq!(session.config.pool_capacity, 4);
        assert_eq!(session.config.dispatch, DispatchPolicy::SlidingWindow);
        assert_eq!(
            session.config_source,
            Some(temp_dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn explicit_config_drives_root_discovery() {
        let (temp_dir, root) = temp_root();
        let config_path = temp_dir.path().join("ci.yaml");
        std::fs::write(&config_path, "commands:\n  repo_root: hg root\n").unwrap();
        let runner = FakeRunner::new().respond("hg root", &root);

        let session = Session::open(Arc::new(runner), Some(&config_path)).unwrap();

        assert_eq!(session.root(), root);
        assert_eq!(session.config.commands.repo_root, "hg root");
        assert_eq!(session.config_source, Some(config_path));
    }

    #[test]
    fn open_outside_repository_is_repo_error() {
        let err = Session::open(Arc::new(FakeRunner::new()), None).err().unwrap();
        assert_eq!(err.exit_code(), crate::exit_codes::REPO_ERROR);
    }

    #[test]
    fn blank_path_is_user_error() {
        let err = resolve_target("  ").unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
    }

    #[test]
    fn resolve_target_is_absolute() {
        let target = resolve_target("art/../a.bin").unwrap();
        assert!(std::path::Path::new(&target).is_absolute());
        assert!(target.ends_with("/a.bin"));
        assert!(!target.contains(".."));
    }

    #[test]
    fn invalid_config_file_is_config_error() {
        let (temp_dir, root) = temp_root();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "pool_capacity: 0\n").unwrap();
        let runner = FakeRunner::new().respond("git rev-parse --show-toplevel", &root);

        let err = Session::open(Arc::new(runner), None).err().unwrap();
        assert_eq!(err.exit_code(), crate::exit_codes::CONFIG_ERROR);
    }
}
