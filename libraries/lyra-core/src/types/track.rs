/// Track domain type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A track in the library.
///
/// The normalized forward-slash `file_path` is the identity key; a track
/// exists exactly as long as the most recent sync saw its file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Normalized file path on disk (identity key)
    pub file_path: String,

    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Track duration in seconds
    pub duration_seconds: Option<f64>,

    /// Path of the extracted cover image, if any
    pub cover_path: Option<String>,

    /// When the track was added to the library
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with no metadata
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            title: None,
            artist: None,
            album: None,
            duration_seconds: None,
            cover_path: None,
            added_at: Utc::now(),
        }
    }

    /// Whether two records carry the same library content.
    ///
    /// Ignores `added_at`; used to decide if an upsert actually changed
    /// the stored row.
    pub fn same_content(&self, other: &Self) -> bool {
        self.file_path == other.file_path
            && self.title == other.title
            && self.artist == other.artist
            && self.album == other.album
            && self.duration_seconds == other.duration_seconds
            && self.cover_path == other.cover_path
    }
}

/// As-parsed tag payload for one audio file.
///
/// Transient; exists only between the metadata read and normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrackMetadata {
    /// Normalized path of the originating file
    pub file_path: String,

    /// Tag title, verbatim
    pub title: Option<String>,

    /// Tag artist, verbatim
    pub artist: Option<String>,

    /// Tag album, verbatim
    pub album: Option<String>,

    /// Track number on the album
    pub track_number: Option<u32>,

    /// Duration in seconds from the audio properties
    pub duration_seconds: Option<f64>,

    /// Embedded cover image, if the file carries one
    pub picture: Option<EmbeddedPicture>,
}

impl RawTrackMetadata {
    /// Create empty raw metadata for a file
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }
}

/// Embedded cover image extracted from an audio file tag.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedPicture {
    /// Raw image bytes
    pub data: Vec<u8>,

    /// MIME type (e.g. "image/jpeg"), if the tag declares one
    pub mime_type: Option<String>,
}
