//! Audio file format classification.
//!
//! Pure functions: given normalized file paths, partition them into the
//! set the metadata reader can handle and everything else. No I/O.

/// Extensions the metadata reader supports.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac"];

/// Get the lowercased extension of a normalized (forward-slash) path.
///
/// Returns `None` if the file name has no extension.
pub fn extension(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Check whether a path names a supported audio file.
pub fn is_supported(path: &str) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Partition paths into supported and unsupported files.
///
/// Order is preserved within each output.
pub fn classify(paths: Vec<String>) -> (Vec<String>, Vec<String>) {
    paths.into_iter().partition(|path| is_supported(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("/music/Song.MP3"), Some("mp3".to_string()));
        assert_eq!(extension("/music/song.flac"), Some("flac".to_string()));
    }

    #[test]
    fn extension_absent_cases() {
        assert_eq!(extension("/music/README"), None);
        assert_eq!(extension("/music/.hidden"), None);
        assert_eq!(extension("/music/trailing."), None);
    }

    #[test]
    fn supported_check() {
        assert!(is_supported("/a/b.mp3"));
        assert!(is_supported("/a/b.OGG"));
        assert!(!is_supported("/a/b.txt"));
        assert!(!is_supported("/a/b"));
    }

    #[test]
    fn classify_preserves_order_within_partitions() {
        let paths = vec![
            "/m/1.mp3".to_string(),
            "/m/2.txt".to_string(),
            "/m/3.flac".to_string(),
            "/m/4.wma".to_string(),
            "/m/5.wav".to_string(),
        ];
        let (supported, unsupported) = classify(paths);
        assert_eq!(supported, ["/m/1.mp3", "/m/3.flac", "/m/5.wav"]);
        assert_eq!(unsupported, ["/m/2.txt", "/m/4.wma"]);
    }

    #[test]
    fn classify_empty_input() {
        let (supported, unsupported) = classify(Vec::new());
        assert!(supported.is_empty());
        assert!(unsupported.is_empty());
    }
}
