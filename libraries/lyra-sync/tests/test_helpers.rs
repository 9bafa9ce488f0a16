//! Test helpers for sync integration tests
//!
//! Audio fixtures are real files: a minimal PCM WAV, optionally tagged
//! through lofty's write API, so the whole pipeline (scan, probe,
//! normalize, persist) runs against what it would see in production.

use lofty::config::WriteOptions;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::tag::{Accessor, Tag, TagExt, TagType};
use sqlx::SqlitePool;
use std::path::Path;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = lyra_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        lyra_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }
}

/// Optional tag values for a fixture file
#[derive(Default)]
pub struct Tags<'a> {
    pub title: Option<&'a str>,
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
    pub cover: Option<&'a [u8]>,
}

/// One tenth of a second of 8 kHz mono 16-bit silence.
fn wav_bytes() -> Vec<u8> {
    let data_len: u32 = 800 * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
    out.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}

/// Write a playable WAV fixture, optionally tagged.
pub fn write_audio_file(path: &Path, tags: Tags<'_>) {
    std::fs::write(path, wav_bytes()).expect("Failed to write wav fixture");

    if tags.title.is_none()
        && tags.artist.is_none()
        && tags.album.is_none()
        && tags.cover.is_none()
    {
        return;
    }

    let mut tag = Tag::new(TagType::Id3v2);
    if let Some(title) = tags.title {
        tag.set_title(title.to_string());
    }
    if let Some(artist) = tags.artist {
        tag.set_artist(artist.to_string());
    }
    if let Some(album) = tags.album {
        tag.set_album(album.to_string());
    }
    if let Some(cover) = tags.cover {
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Png),
            None,
            cover.to_vec(),
        ));
    }

    tag.save_to_path(path, WriteOptions::default())
        .expect("Failed to tag wav fixture");
}
