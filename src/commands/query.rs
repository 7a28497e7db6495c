//! Read-only commands: `locks`, `status`, `info`.

use super::{Session, resolve_target};
use crate::error::{LfsLockError, Result};
use crate::status::LockRecord;

pub(super) fn cmd_locks(session: &Session, owner: Option<&str>, json: bool) -> Result<()> {
    let records = filter_by_owner(session.orchestrator.locked_files(session.root()), owner);

    if json {
        let text = serde_json::to_string_pretty(&records).map_err(|e| {
            LfsLockError::UserError(format!("failed to serialize locks to JSON: {}", e))
        })?;
        println!("{}", text);
    } else {
        print!("{}", render_table(&records));
    }
    Ok(())
}

pub(super) fn cmd_status(session: &Session, path: &str) -> Result<()> {
    let full = resolve_target(path)?;
    if session.orchestrator.is_locked(session.root(), &full) {
        println!("Locked: {}", full);
    } else {
        println!("Not locked: {}", full);
    }
    Ok(())
}

pub(super) fn cmd_info(session: &Session) -> Result<()> {
    let source = session
        .config_source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());

    println!("Config: [{}]", source);
    print!("{}", session.config.to_yaml()?);
    Ok(())
}

fn filter_by_owner(records: Vec<LockRecord>, owner: Option<&str>) -> Vec<LockRecord> {
    match owner {
        Some(owner) => records.into_iter().filter(|r| r.owner == owner).collect(),
        None => records,
    }
}

/// Left-aligned PATH/OWNER/ID table, one lock per line.
fn render_table(records: &[LockRecord]) -> String {
    if records.is_empty() {
        return "No active locks.\n".to_string();
    }

    let path_width = records
        .iter()
        .map(|r| r.file_path.len())
        .max()
        .unwrap_or(0)
        .max("PATH".len());
    let owner_width = records
        .iter()
        .map(|r| r.owner.len())
        .max()
        .unwrap_or(0)
        .max("OWNER".len());

    let mut out = format!(
        "{:<path_width$}  {:<owner_width$}  ID\n",
        "PATH", "OWNER"
    );
    for record in records {
        out.push_str(&format!(
            "{:<path_width$}  {:<owner_width$}  {}\n",
            record.file_path, record.owner, record.id
        ));
    }
    out
}
