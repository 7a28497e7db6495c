//! CLI argument parsing for lfslock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// lfslock: cooperative Git LFS file locking.
///
/// Locks and unlocks files (or whole directories) through `git lfs`,
/// dispatching one command per file in parallel.
#[derive(Parser, Debug)]
#[command(name = "lfslock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file to use instead of `<repo root>/.lfslock.yaml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic logging (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lfslock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lock a file, or every file under a directory.
    Lock(PathArgs),

    /// Lock a file or directory, taking over existing locks.
    LockForce(PathArgs),

    /// Unlock a file, or every file under a directory.
    Unlock(PathArgs),

    /// Unlock a file or directory, including locks held by others.
    UnlockForce(PathArgs),

    /// Unlock every currently locked file.
    UnlockAll,

    /// Force-unlock every currently locked file.
    UnlockForceAll,

    /// Unlock every file locked by the given owner.
    UnlockAllOwner(OwnerArgs),

    /// Force-unlock every file locked by the given owner.
    UnlockForceAllOwner(OwnerArgs),

    /// List current locks.
    Locks(LocksArgs),

    /// Report whether a single file is locked.
    Status(PathArgs),

    /// Show the resolved repository context and settings.
    Info,
}

/// A file or directory argument.
#[derive(Parser, Debug)]
pub struct PathArgs {
    /// File or directory path.
    pub path: String,
}

/// An owner argument.
#[derive(Parser, Debug)]
pub struct OwnerArgs {
    /// Lock owner exactly as shown by `lfslock locks`.
    pub owner: String,
}

/// Arguments for the `locks` command.
#[derive(Parser, Debug)]
pub struct LocksArgs {
    /// Only show locks held by this owner.
    #[arg(long)]
    pub owner: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
