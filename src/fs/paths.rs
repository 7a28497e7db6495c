//! Path normalization helpers.
//!
//! Paths handed to the LFS command are always forward-slash separated, and
//! paths inside the repository are passed relative to its root.

use crate::error::Result;
use std::path::{Component, Path, PathBuf};

/// Convert backslashes to `/`, collapse doubled slashes, and trim whitespace.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").replace("//", "/").trim().to_string()
}

/// Absolute, lexically cleaned, normalized form of `path`.
///
/// Relative paths are resolved against the current working directory.
/// `.` and `..` components are folded without touching the filesystem, so the
/// path does not need to exist.
pub fn full_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let absolute = std::path::absolute(path.as_ref())?;
    Ok(normalize_path(&clean(&absolute).to_string_lossy()))
}

fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// True if `path` exists and is a directory.
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Strip a leading `<root>/` from `path`, if present.
pub fn relative_to_root<'a>(root: &str, path: &'a str) -> &'a str {
    if root.is_empty() {
        return path;
    }
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(normalize_path("C:\\work\\game\\art.psd"), "C:/work/game/art.psd");
    }

    #[test]
    fn normalize_collapses_double_slashes_and_trims() {
        assert_eq!(normalize_path("  /repo//assets/x.bin\n"), "/repo/assets/x.bin");
    }

    #[test]
    fn relative_to_root_strips_prefix() {
        assert_eq!(relative_to_root("/repo", "/repo/assets/x.bin"), "assets/x.bin");
    }

    #[test]
    fn relative_to_root_keeps_outside_paths() {
        assert_eq!(relative_to_root("/repo", "/other/x.bin"), "/other/x.bin");
        assert_eq!(relative_to_root("/repo", "assets/x.bin"), "assets/x.bin");
    }

    #[test]
    fn relative_to_root_requires_separator_after_root() {
        assert_eq!(relative_to_root("/repo", "/repository/x.bin"), "/repository/x.bin");
    }

    #[test]
    fn relative_to_root_with_empty_root_is_identity() {
        assert_eq!(relative_to_root("", "/repo/x.bin"), "/repo/x.bin");
    }

    #[test]
    fn full_path_of_absolute_path_is_cleaned() {
        let temp_dir = TempDir::new().unwrap();
        let base = normalize_path(&temp_dir.path().to_string_lossy());
        let input = temp_dir.path().join("a").join("..").join(".").join("b.bin");

        assert_eq!(full_path(&input).unwrap(), format!("{}/b.bin", base));
    }

    #[test]
    fn full_path_of_relative_path_is_absolute() {
        let result = full_path("some/file.bin").unwrap();
        assert!(result.ends_with("some/file.bin"));
        assert!(Path::new(&result).is_absolute());
    }

    #[test]
    fn is_directory_distinguishes_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("f.bin");
        std::fs::write(&file, b"x").unwrap();

        assert!(is_directory(temp_dir.path()));
        assert!(!is_directory(&file));
        assert!(!is_directory(temp_dir.path().join("missing")));
    }
}
