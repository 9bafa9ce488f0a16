//! Track queries.

use crate::error::{Result, StorageError};
use chrono::Utc;
use lyra_core::Track;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;

const TRACK_COLUMNS: &str =
    "file_path, title, artist_name, album_name, duration_seconds, cover_path, added_at";

fn track_from_row(row: &SqliteRow) -> Result<Track> {
    let added_at = row.get::<i64, _>("added_at");
    Ok(Track {
        file_path: row.get("file_path"),
        title: row.get("title"),
        artist: row.get("artist_name"),
        album: row.get("album_name"),
        duration_seconds: row.get("duration_seconds"),
        cover_path: row.get("cover_path"),
        added_at: chrono::DateTime::from_timestamp(added_at, 0)
            .ok_or_else(|| StorageError::CorruptRow(format!("invalid timestamp {added_at}")))?,
    })
}

/// Get all tracks, ordered by title.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks ORDER BY title, file_path"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(track_from_row).collect()
}

/// Find a track by its normalized file path.
pub async fn find_by_path(pool: &SqlitePool, file_path: &str) -> Result<Option<Track>> {
    let row = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks WHERE file_path = ?"
    ))
    .bind(file_path)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(track_from_row).transpose()
}

/// Outcome of [`upsert`].
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// The stored row after the operation
    pub track: Track,
    /// Whether the row was inserted or its content changed
    pub changed: bool,
}

/// Insert or update a track by file-path identity.
///
/// Also materializes the referenced artist and album rows. The album's
/// artist/cover columns are written only when the album is first seen.
/// Returns `changed: false` when the stored row already matched, so an
/// unchanged library syncs to an empty added set.
pub async fn upsert(pool: &SqlitePool, track: &Track) -> Result<UpsertOutcome> {
    if let Some(existing) = find_by_path(pool, &track.file_path).await? {
        if existing.same_content(track) {
            return Ok(UpsertOutcome {
                track: existing,
                changed: false,
            });
        }
    }

    let now = Utc::now().timestamp();

    if let Some(artist) = &track.artist {
        sqlx::query("INSERT INTO artists (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(artist)
            .bind(now)
            .execute(pool)
            .await?;
    }

    if let Some(album) = &track.album {
        sqlx::query(
            "INSERT INTO albums (name, artist_name, cover_path, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(name) DO NOTHING",
        )
        .bind(album)
        .bind(&track.artist)
        .bind(&track.cover_path)
        .bind(now)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        "INSERT INTO tracks (file_path, title, artist_name, album_name, duration_seconds, cover_path, added_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(file_path) DO UPDATE SET
             title = excluded.title,
             artist_name = excluded.artist_name,
             album_name = excluded.album_name,
             duration_seconds = excluded.duration_seconds,
             cover_path = excluded.cover_path,
             updated_at = excluded.updated_at",
    )
    .bind(&track.file_path)
    .bind(&track.title)
    .bind(&track.artist)
    .bind(&track.album)
    .bind(track.duration_seconds)
    .bind(&track.cover_path)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let stored = find_by_path(pool, &track.file_path)
        .await?
        .ok_or_else(|| StorageError::CorruptRow("upserted track row missing".to_string()))?;

    Ok(UpsertOutcome {
        track: stored,
        changed: true,
    })
}

/// Delete every track whose file path is NOT in `paths`.
///
/// An empty set removes all tracks. The kept set is never bound as SQL
/// parameters, so it can exceed SQLite's per-statement variable limit;
/// doomed keys are deleted in bounded chunks. Returns the number of
/// deleted rows.
pub async fn delete_not_in(pool: &SqlitePool, paths: &[String]) -> Result<u64> {
    if paths.is_empty() {
        let result = sqlx::query("DELETE FROM tracks").execute(pool).await?;
        return Ok(result.rows_affected());
    }

    let keep: HashSet<&str> = paths.iter().map(String::as_str).collect();
    let rows = sqlx::query("SELECT file_path FROM tracks")
        .fetch_all(pool)
        .await?;
    let doomed: Vec<String> = rows
        .iter()
        .map(|row| row.get::<String, _>("file_path"))
        .filter(|path| !keep.contains(path.as_str()))
        .collect();

    let mut deleted = 0;
    for chunk in doomed.chunks(crate::DELETE_CHUNK_SIZE) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!("DELETE FROM tracks WHERE file_path IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for path in chunk {
            query = query.bind(path);
        }

        deleted += query.execute(pool).await?.rows_affected();
    }

    Ok(deleted)
}
