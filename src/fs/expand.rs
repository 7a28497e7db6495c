//! Expansion of a user-supplied path into the files it denotes.

use super::paths::{is_directory, normalize_path, relative_to_root};
use crate::error::{LfsLockError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Build a matcher for repository-relative exclude globs.
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let normalized = pattern.trim().replace('\\', "/");
        if normalized.is_empty() {
            continue;
        }
        let glob = Glob::new(&normalized).map_err(|e| {
            LfsLockError::ConfigError(format!("invalid exclude pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| LfsLockError::ConfigError(format!("failed to build exclude set: {}", e)))
}

/// Flatten `path` into a list of files.
///
/// A directory expands recursively to every non-directory entry beneath it,
/// sorted by file name at each level. Entries whose path relative to `root`
/// matches `exclude` are skipped. Anything else, including a path that does
/// not exist, is returned as the only entry.
pub fn expand_files(root: &str, path: &str, exclude: &GlobSet) -> Vec<String> {
    if !is_directory(path) {
        return vec![path.to_string()];
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path, error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let file = normalize_path(&entry.path().to_string_lossy());
        let relative = relative_to_root(root, &file);
        if exclude.is_match(relative) {
            debug!(file = relative, "excluded");
            continue;
        }

        files.push(file);
    }

    files
}
