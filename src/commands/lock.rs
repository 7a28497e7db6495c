//! Lock and unlock commands.

use super::{Session, resolve_target};
use crate::error::Result;
use crate::fs::is_directory;
use crate::locks::Operation;

/// `lock`, `lock-force`, `unlock`, `unlock-force`.
pub(super) fn cmd_path(
    session: &Session,
    operation: Operation,
    forced: bool,
    path: &str,
) -> Result<()> {
    let full = resolve_target(path)?;
    println!("{}", target_line(&full, is_directory(&full)));

    let orchestrator = &session.orchestrator;
    let ok = match operation {
        Operation::Lock => orchestrator.lock_path(session.root(), forced, &full),
        Operation::Unlock => orchestrator.unlock_path(session.root(), forced, &full),
    };

    if let Some(line) = outcome_line(operation, forced, ok, &full) {
        println!("{}", line);
    }
    Ok(())
}

/// `unlock-all`, `unlock-force-all`, and their `-owner` variants.
pub(super) fn cmd_unlock_all(session: &Session, forced: bool, owner: Option<&str>) -> Result<()> {
    let orchestrator = &session.orchestrator;
    let unlocked = match owner {
        Some(owner) => orchestrator.unlock_all_by_owner(session.root(), forced, owner),
        None => orchestrator.unlock_all(session.root(), forced),
    };

    println!("Total Unlocked: {}", unlocked);
    Ok(())
}

fn target_line(path: &str, directory: bool) -> String {
    if directory {
        format!("Directory: [{}]", path)
    } else {
        format!("File: [{}]", path)
    }
}

/// Closing line after a single-path batch. Plain `lock` prints none.
fn outcome_line(operation: Operation, forced: bool, ok: bool, path: &str) -> Option<String> {
    if operation == Operation::Lock && !forced {
        return None;
    }

    Some(if ok {
        format!("{}: {}", operation.past_tense(), path)
    } else {
        format!("{} Failed: {}", operation.verb(), path)
    })
}
