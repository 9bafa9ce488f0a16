//! Artist queries.

use crate::error::{Result, StorageError};
use lyra_core::Artist;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;

/// Get all artists, ordered by name.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query("SELECT name, created_at FROM artists ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let created_at = row.get::<i64, _>("created_at");
            Ok(Artist {
                name: row.get("name"),
                created_at: chrono::DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
                    StorageError::CorruptRow(format!("invalid timestamp {created_at}"))
                })?,
            })
        })
        .collect()
}

/// Delete every artist whose name is NOT in `names`.
///
/// An empty set removes all artists. The kept set is never bound as SQL
/// parameters; doomed names are deleted in bounded chunks. Returns the
/// number of deleted rows.
pub async fn delete_not_in(pool: &SqlitePool, names: &[String]) -> Result<u64> {
    if names.is_empty() {
        let result = sqlx::query("DELETE FROM artists").execute(pool).await?;
        return Ok(result.rows_affected());
    }

    let keep: HashSet<&str> = names.iter().map(String::as_str).collect();
    let rows = sqlx::query("SELECT name FROM artists").fetch_all(pool).await?;
    let doomed: Vec<String> = rows
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .filter(|name| !keep.contains(name.as_str()))
        .collect();

    let mut deleted = 0;
    for chunk in doomed.chunks(crate::DELETE_CHUNK_SIZE) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!("DELETE FROM artists WHERE name IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for name in chunk {
            query = query.bind(name);
        }

        deleted += query.execute(pool).await?.rows_affected();
    }

    Ok(deleted)
}
