//! Raw tag data to canonical track records.

use lyra_artwork::CoverStore;
use lyra_core::{path::file_stem, RawTrackMetadata, Track};

/// A normalized track plus the cover failure that befell it, if any.
///
/// A track whose embedded cover could not be saved is still synced,
/// just without a cover path.
#[derive(Debug)]
pub struct NormalizedTrack {
    /// The canonical record to persist
    pub track: Track,
    /// Reason the embedded cover was not saved, if there was one
    pub cover_error: Option<String>,
}

/// Convert raw tag data into the canonical track record.
///
/// Title falls back to the file stem when the tag carries none; empty
/// artist/album strings are treated as absent. Embedded picture bytes
/// are delegated to the cover store.
pub async fn normalize(covers: &CoverStore, raw: RawTrackMetadata) -> NormalizedTrack {
    let mut track = Track::new(raw.file_path);

    track.title = match raw.title {
        Some(title) if !title.trim().is_empty() => Some(title),
        _ => Some(file_stem(&track.file_path).to_string()),
    };
    track.artist = raw.artist.filter(|a| !a.trim().is_empty());
    track.album = raw.album.filter(|a| !a.trim().is_empty());
    track.duration_seconds = raw.duration_seconds;

    let mut cover_error = None;
    if let Some(picture) = raw.picture {
        match covers.get_or_save(&picture).await {
            Ok(cover_path) => track.cover_path = Some(cover_path),
            Err(e) => {
                tracing::warn!(file = %track.file_path, error = %e, "failed to save cover");
                cover_error = Some(e.to_string());
            }
        }
    }

    NormalizedTrack { track, cover_error }
}
