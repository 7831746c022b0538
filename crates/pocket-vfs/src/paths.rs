//! Path resolution for the workspace tree.
//!
//! Every path that reaches the store is *canonical*: it starts with `/`,
//! contains no empty, `.` or `..` segments and has no trailing slash
//! (except the root itself, which is exactly `/`).
//!
//! Resolution never fails. Whether the resolved path names anything is a
//! separate question answered by the store.
//!
//! ```
//! use pocket_vfs::paths::resolve;
//!
//! assert_eq!(resolve("/src", "../lib/./a.rs"), "/lib/a.rs");
//! assert_eq!(resolve("/", "../../.."), "/");
//! ```

/// The root path.
pub const ROOT: &str = "/";

/// Resolve `target` against the working directory `cwd`.
///
/// - an empty target returns `cwd` unchanged
/// - a target starting with `/` ignores `cwd`
/// - anything else is appended to `cwd` and canonicalized
pub fn resolve(cwd: &str, target: &str) -> String {
    if target.is_empty() {
        return cwd.to_string();
    }
    if target.starts_with('/') {
        return normalize(target);
    }
    let combined = if cwd == ROOT {
        target.to_string()
    } else {
        format!("{cwd}/{target}")
    };
    normalize(&combined)
}

/// Canonicalize a path.
///
/// `..` pops the previous segment and is ignored at the root, so the result
/// can never climb above `/`.
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            name => stack.push(name),
        }
    }
    if stack.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", stack.join("/"))
    }
}

/// Non-empty segments of a canonical path. The root has none.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Parent of a canonical path, or `None` for the root.
pub fn parent(path: &str) -> Option<String> {
    let mut parts = segments(path);
    parts.pop()?;
    if parts.is_empty() {
        Some(ROOT.to_string())
    } else {
        Some(format!("/{}", parts.join("/")))
    }
}

/// Last segment of a canonical path, or `None` for the root.
pub fn file_name(path: &str) -> Option<&str> {
    path.rsplit('/').find(|s| !s.is_empty())
}

/// Join a directory and a single child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// True if `path` equals `ancestor` or lies underneath it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return true;
    }
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Rewrite the `from` prefix of `path` to `to`.
///
/// Returns `None` when `path` is not within `from`.
pub fn rebase(path: &str, from: &str, to: &str) -> Option<String> {
    if path == from {
        return Some(to.to_string());
    }
    if !is_within(path, from) {
        return None;
    }
    let rest = if from == ROOT {
        path.trim_start_matches('/')
    } else {
        path[from.len()..].trim_start_matches('/')
    };
    Some(join(to, rest))
}

/// Check that `name` can be used as a single path segment.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_target("/a/b", "", "/a/b")]
    #[case::dot("/a/b", ".", "/a/b")]
    #[case::relative_from_root("/", "src/main.rs", "/src/main.rs")]
    #[case::relative("/src", "main.rs", "/src/main.rs")]
    #[case::absolute_ignores_cwd("/src", "/lib/x", "/lib/x")]
    #[case::parent("/a/b/c", "..", "/a/b")]
    #[case::parent_then_child("/a/b", "../c", "/a/c")]
    #[case::dots_inside("/", "a/./b/../c", "/a/c")]
    #[case::repeated_slashes("/", "a//b///c/", "/a/b/c")]
    #[case::root_floor("/a", "../../../..", "/")]
    #[case::absolute_root_floor("/x", "/../..", "/")]
    #[case::root_itself("/a", "/", "/")]
    fn resolve_cases(#[case] cwd: &str, #[case] target: &str, #[case] expected: &str) {
        assert_eq!(resolve(cwd, target), expected);
    }

    #[test]
    fn canonical_paths_are_fixed_points() {
        for p in ["/", "/a", "/a/b/c.txt", "/README.md"] {
            assert_eq!(resolve(p, "."), p);
            assert_eq!(resolve("/elsewhere", p), p);
            assert_eq!(normalize(p), p);
        }
    }

    #[test]
    fn parent_and_file_name() {
        assert_eq!(parent("/"), None);
        assert_eq!(parent("/a").as_deref(), Some("/"));
        assert_eq!(parent("/a/b/c").as_deref(), Some("/a/b"));
        assert_eq!(file_name("/"), None);
        assert_eq!(file_name("/a/b.txt"), Some("b.txt"));
    }

    #[test]
    fn within_is_segment_aware() {
        assert!(is_within("/a/b", "/a"));
        assert!(is_within("/a", "/a"));
        assert!(!is_within("/ab", "/a"));
        assert!(is_within("/anything", "/"));
    }

    #[test]
    fn rebase_rewrites_prefix() {
        assert_eq!(rebase("/a/b/c.txt", "/a", "/z").as_deref(), Some("/z/b/c.txt"));
        assert_eq!(rebase("/a", "/a", "/z/a").as_deref(), Some("/z/a"));
        assert_eq!(rebase("/ab/c", "/a", "/z"), None);
    }

    #[test]
    fn name_validation() {
        assert!(is_valid_name("main.rs"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("a/b"));
    }
}
