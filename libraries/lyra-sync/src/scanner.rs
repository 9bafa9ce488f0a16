//! Recursive directory listing.
//!
//! Lists every file under a directory; deciding which of them are audio
//! files is the classifier's job, not the scanner's. Paths come back in
//! normalized forward-slash form ready to be used as database keys.

use crate::error::ScanError;
use lyra_core::path::normalize_slashes;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively list all files under `path`.
///
/// Symlinks are not followed. Unreadable subtrees are skipped rather
/// than failing the whole directory; only a missing or non-directory
/// root is an error. An empty directory yields an empty list.
pub fn scan_directory(path: &Path) -> Result<Vec<String>, ScanError> {
    if !path.exists() {
        return Err(ScanError::NotFound(normalize_slashes(path)));
    }

    if !path.is_dir() {
        return Err(ScanError::NotADirectory(normalize_slashes(path)));
    }

    let files = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| normalize_slashes(entry.path()))
        .collect();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_files_recursively() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();
        fs::write(base.join("cover.png"), b"not audio").unwrap();

        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("song2.ogg"), b"fake ogg").unwrap();

        let files = scan_directory(base).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|p| p.ends_with("song1.mp3")));
        assert!(files.iter().any(|p| p.ends_with("cover.png")));
        assert!(files.iter().any(|p| p.ends_with("subdir/song2.ogg")));
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let temp = TempDir::new().unwrap();
        let files = scan_directory(temp.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            scan_directory(&missing),
            Err(ScanError::NotFound(_))
        ));
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("song.mp3");
        fs::write(&file, b"fake mp3").unwrap();
        assert!(matches!(
            scan_directory(&file),
            Err(ScanError::NotADirectory(_))
        ));
    }
}
