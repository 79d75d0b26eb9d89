//! Forward-slash path helpers
//!
//! Relative paths that leave this crate (scan keys, ignore-match subjects,
//! diff entries) always use `/`, whatever the host separator is.

use std::path::Path;

/// Replace every backslash with a forward slash.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Render a path with forward slashes.
pub fn to_slash(path: &Path) -> String {
    normalize_separators(&path.to_string_lossy())
}

/// Express `path` relative to `root` with forward slashes.
///
/// Returns `None` when `path` is not inside `root`.
pub fn relative_slash(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(to_slash)
}

/// Join two forward-slash fragments, tolerating an empty prefix.
pub fn join_slash(prefix: &str, rest: &str) -> String {
    if prefix.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), rest)
    }
}
