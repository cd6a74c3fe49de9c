//! Anchored path resolution
//!
//! Everything here is pure path arithmetic: nothing touches the filesystem
//! and nothing can fail.

use std::path::{Component, Path, PathBuf};

/// Resolve a base directory against the root.
///
/// An absolute `base_dir` replaces the root entirely.
pub fn resolve_base(root: &Path, base_dir: impl AsRef<Path>) -> PathBuf {
    normalize(&root.join(base_dir))
}

/// Resolve `relative_path` against `base_dir`, itself anchored at `root`.
///
/// This yields the destination of an intent. If `root` is relative, so is
/// the result; callers anchor the root once up front.
pub fn resolve(root: &Path, base_dir: impl AsRef<Path>, relative_path: impl AsRef<Path>) -> PathBuf {
    normalize(&resolve_base(root, base_dir).join(relative_path))
}

/// Fold `.` and `..` components lexically.
///
/// `..` never climbs above the filesystem root. A relative path keeps its
/// leading `..` components. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_base_dir_is_the_root() {
        assert_eq!(resolve_base(Path::new("/srv/site"), "."), PathBuf::from("/srv/site"));
    }

    #[test]
    fn parent_dir_never_climbs_above_root() {
        assert_eq!(normalize(Path::new("/../../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn relative_path_keeps_leading_parents() {
        assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
    }

    #[test]
    fn empty_normalizes_to_current_dir() {
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }
}
