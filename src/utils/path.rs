//! Lexical path cleanup for reported directory paths.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path without touching the filesystem.
///
/// `.` components are dropped and `name/..` pairs cancel out. A `..` that
/// would climb above a root is discarded; one that would climb above a
/// relative start is kept. The current directory cleans to an empty path,
/// so joining a name onto it yields just that name.
///
/// # Examples
///
/// ```
/// # use std::path::{Path, PathBuf};
/// # use dirtally::utils::clean_path;
/// assert_eq!(clean_path(Path::new(".")).join("sub"), PathBuf::from("sub"));
/// assert_eq!(clean_path(Path::new("a/./b/../c/")), PathBuf::from("a/c"));
/// ```
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(cleaned.components().next_back(), Some(Component::Normal(_))) {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push(component);
                }
            }
            _ => cleaned.push(component),
        }
    }

    cleaned
}
