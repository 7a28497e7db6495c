//! Parsing of `git lfs locks` status lines.
//!
//! Each line of the lock listing has the shape:
//!
//! ```text
//! <path>\t<owner>\t<id>
//! ```
//!
//! Parsing is total. A line that does not contain both tab separators
//! produces the empty [`LockRecord`], and callers skip any record whose
//! `file_path` is empty.

use serde::Serialize;

/// One currently held lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LockRecord {
    /// Repository-relative path of the locked file.
    pub file_path: String,
    /// Identity holding the lock.
    pub owner: String,
    /// Opaque lock identifier assigned by the server.
    pub id: String,
}

impl LockRecord {
    /// True for the record produced by a malformed line.
    pub fn is_empty(&self) -> bool {
        self.file_path.is_empty()
    }
}

/// Find the next tab strictly after `from`.
fn next_tab(line: &str, from: usize) -> Option<usize> {
    let start = from + 1;
    line.as_bytes()
        .get(start..)?
        .iter()
        .position(|&b| b == b'\t')
        .map(|pos| start + pos)
}

/// Parse one status line into a [`LockRecord`].
///
/// The first field is only kept when the second separator is also present;
/// a two-field line yields the empty record. Everything after the second tab
/// becomes the id, which may be empty.
pub fn parse_lock_line(line: &str) -> LockRecord {
    let Some(first) = next_tab(line, 0) else {
        return LockRecord::default();
    };
    let Some(second) = next_tab(line, first) else {
        return LockRecord::default();
    };

    LockRecord {
        file_path: line[..first].trim().to_string(),
        owner: line[first..second].trim().to_string(),
        id: line[second..].trim().to_string(),
    }
}

/// Parse a full listing, one record per line, trimming each line first.
///
/// Malformed lines are kept as empty records so the caller decides how to
/// skip them.
pub fn parse_lock_listing<S: AsRef<str>>(lines: &[S]) -> Vec<LockRecord> {
    lines
        .iter()
        .map(|line| parse_lock_line(line.as_ref().trim()))
        .collect()
}
