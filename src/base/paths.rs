//! Slash-separated path arithmetic for module specifiers and directory keys.
//!
//! Keys inside the repository are always `/`-separated and relative to the
//! owning root (the repository or a package), with no leading or trailing
//! slash. The empty string is the root itself.

use super::constants::SOURCE_EXTENSIONS;

/// Normalizes a slash path: drops `.` and empty segments, folds `..`.
///
/// Returns `None` when `..` would climb above the root.
pub fn normalize(path: &str) -> Option<String> {
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop()?;
            }
            other => out.push(other),
        }
    }
    Some(out.join("/"))
}

/// Joins a relative specifier onto a base directory key and normalizes.
pub fn join_relative(base: &str, relative: &str) -> Option<String> {
    if base.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{base}/{relative}"))
    }
}

/// Strips a trailing supported source extension from the last segment.
///
/// `./button.tsx` becomes `./button`; `./styles.css` is left alone.
pub fn strip_source_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    if let Some(dot) = path[name_start..].rfind('.') {
        let ext = &path[name_start + dot + 1..];
        if SOURCE_EXTENSIONS.contains(&ext) {
            return &path[..name_start + dot];
        }
    }
    path
}
