//! Path normalization helpers.
//!
//! The engine stores every path as a forward-slash string regardless of
//! host OS, so that database keys and cover references compare equal
//! across platforms.

use std::path::Path;

/// Convert a path to its normalized forward-slash string form.
pub fn normalize_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// The file name of a normalized path without its extension.
///
/// Used as the fallback track title when tags carry none.
pub fn file_stem(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
