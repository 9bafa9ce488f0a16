/// Metadata reader implementation using lofty
use crate::error::{MetadataError, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::picture::{MimeType, PictureType};
use lofty::tag::Accessor;
use lyra_core::{path::normalize_slashes, EmbeddedPicture, RawTrackMetadata};
use std::path::Path;

/// Metadata reader using the lofty library
pub struct LoftyMetadataReader;

impl LoftyMetadataReader {
    /// Create a new metadata reader
    pub fn new() -> Self {
        Self
    }

    /// Read the raw tag payload of one audio file.
    ///
    /// A corrupt or partially readable file produces an error tagged with
    /// the path; it never panics, so batch reads stay isolated per file.
    pub fn read_raw(&self, path: &Path) -> Result<RawTrackMetadata> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let file_path = normalize_slashes(path);

        let tagged_file = lofty::read_from_path(path).map_err(|e| MetadataError::Parse {
            path: file_path.clone(),
            reason: e.to_string(),
        })?;

        let mut raw = RawTrackMetadata::new(file_path);
        raw.duration_seconds = Some(tagged_file.properties().duration().as_secs_f64());

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
        let Some(tag) = tag else {
            return Ok(raw);
        };

        raw.title = tag.title().map(|s| s.to_string());
        raw.artist = tag.artist().map(|s| s.to_string());
        raw.album = tag.album().map(|s| s.to_string());
        raw.track_number = tag.track();
        raw.picture = Self::front_cover(tag.pictures());

        Ok(raw)
    }

    /// Pick the embedded cover: front cover preferred, else first picture.
    fn front_cover(pictures: &[lofty::picture::Picture]) -> Option<EmbeddedPicture> {
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first())?;

        Some(EmbeddedPicture {
            data: picture.data().to_vec(),
            mime_type: picture.mime_type().map(Self::mime_type_to_string),
        })
    }

    fn mime_type_to_string(mime_type: &MimeType) -> String {
        match mime_type {
            MimeType::Png => "image/png".to_string(),
            MimeType::Jpeg => "image/jpeg".to_string(),
            MimeType::Tiff => "image/tiff".to_string(),
            MimeType::Bmp => "image/bmp".to_string(),
            MimeType::Gif => "image/gif".to_string(),
            other => other.as_str().to_string(),
        }
    }
}

impl Default for LoftyMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_nonexistent_file_returns_error() {
        let reader = LoftyMetadataReader::new();
        let result = reader.read_raw(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(MetadataError::FileNotFound(_))));
    }

    #[test]
    fn read_corrupt_file_reports_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.mp3");
        fs::write(&path, b"this is not an mp3").unwrap();

        let reader = LoftyMetadataReader::new();
        let err = reader.read_raw(&path).unwrap_err();
        match err {
            MetadataError::Parse { path: p, .. } => assert!(p.ends_with("broken.mp3")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
