//! Path resolution inside the jail
//!
//! Client paths are resolved purely lexically: nothing here touches the
//! filesystem. Containment is a separate check so callers can report it.

use std::path::{Component, Path, PathBuf};

/// Resolves a client-supplied path to an absolute, cleaned path.
///
/// An absolute argument is taken relative to `jail_root`, a relative one
/// relative to `current_dir`. An empty argument resolves to `current_dir`.
pub fn resolve_path(jail_root: &Path, current_dir: &Path, arg: &str) -> PathBuf {
    let joined = if arg.starts_with('/') {
        jail_root.join(arg.trim_start_matches('/'))
    } else {
        current_dir.join(arg)
    };
    clean_path(&joined)
}

/// Lexically normalizes a path: drops `.` and redundant separators and
/// folds `..` into its parent. `..` at the root stays at the root.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            Component::Normal(part) => cleaned.push(part),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Whether `path` lies inside `jail_root`, compared segment by segment so
/// that `/jail2` is not taken to be inside `/jail`.
pub fn is_within_jail(jail_root: &Path, path: &Path) -> bool {
    path.starts_with(jail_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn test_relative_path_joins_current_dir() {
        assert_eq!(
            resolve_path(&p("/jail"), &p("/jail/docs"), "notes.txt"),
            p("/jail/docs/notes.txt")
        );
        assert_eq!(
            resolve_path(&p("/jail"), &p("/jail/docs"), "../pics/./a.png"),
            p("/jail/pics/a.png")
        );
    }

    #[test]
    fn test_absolute_path_is_jail_relative() {
        assert_eq!(
            resolve_path(&p("/jail"), &p("/jail/docs"), "/etc/passwd"),
            p("/jail/etc/passwd")
        );
        assert_eq!(resolve_path(&p("/jail"), &p("/jail/docs"), "/"), p("/jail"));
        assert_eq!(
            resolve_path(&p("/jail"), &p("/jail"), "//pics//a.png"),
            p("/jail/pics/a.png")
        );
    }

    #[test]
    fn test_empty_argument_is_current_dir() {
        assert_eq!(resolve_path(&p("/jail"), &p("/jail/docs"), ""), p("/jail/docs"));
    }

    #[test]
    fn test_parent_segments_can_leave_jail() {
        let resolved = resolve_path(&p("/jail"), &p("/jail"), "../etc");
        assert_eq!(resolved, p("/etc"));
        assert!(!is_within_jail(&p("/jail"), &resolved));

        let resolved = resolve_path(&p("/jail"), &p("/jail/docs"), "/../../etc");
        assert_eq!(resolved, p("/etc"));
        assert!(!is_within_jail(&p("/jail"), &resolved));
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(&p("/a/./b//c/../d")), p("/a/b/d"));
        assert_eq!(clean_path(&p("/../..")), p("/"));
        assert_eq!(clean_path(&p("a/../..")), p(".."));
        assert_eq!(clean_path(&p("a/..")), p("."));
    }

    #[test]
    fn test_clean_path_keeps_leading_parents() {
        assert_eq!(clean_path(&p("../..")), p("../.."));
        assert_eq!(clean_path(&p("a/../../..")), p("../.."));
        assert_eq!(clean_path(&p("../a/../../b")), p("../../b"));
        assert_eq!(clean_path(&p("./../.")), p(".."));
    }

    #[test]
    fn test_jail_containment_is_segment_wise() {
        assert!(is_within_jail(&p("/jail"), &p("/jail")));
        assert!(is_within_jail(&p("/jail"), &p("/jail/sub/file")));
        // A plain string prefix test would accept these siblings.
        assert!(!is_within_jail(&p("/jail"), &p("/jail2")));
        assert!(!is_within_jail(&p("/jail"), &p("/jail2/file")));
        assert!(!is_within_jail(&p("/jail"), &p("/")));
    }
}
