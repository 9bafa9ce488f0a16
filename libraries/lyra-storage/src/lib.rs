//! Lyra Storage
//!
//! `SQLite` persistence layer for the library synchronization engine.
//!
//! Vertical slices per entity (`tracks`, `artists`, `albums`), each owning
//! its own queries. The sync engine is the sole writer: it upserts the
//! current filesystem state and then removes everything not in it.
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), lyra_storage::StorageError> {
//! let pool = create_pool("sqlite://lyra.db").await?;
//! run_migrations(&pool).await?;
//!
//! let tracks = lyra_storage::tracks::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod tracks;

pub use error::{Result, StorageError};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

// SQLite caps bound variables per statement; inverted deletes remove
// their doomed keys in chunks of at most this many.
pub(crate) const DELETE_CHUNK_SIZE: usize = 500;

// Embedded migrations, replayed idempotently at startup.
const MIGRATIONS: &[&str] = &[
    include_str!("../migrations/20250110000001_create_tracks.sql"),
    include_str!("../migrations/20250110000002_create_artists.sql"),
    include_str!("../migrations/20250110000003_create_albums.sql"),
];

/// Create a new `SQLite` pool.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://lyra.db`)
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!(database_url, "created sqlite pool");

    Ok(pool)
}

/// Run database migrations.
///
/// Call once at startup; every statement is written to replay safely.
///
/// # Errors
///
/// Returns an error if a migration statement fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for migration in MIGRATIONS {
        sqlx::raw_sql(migration)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }

    Ok(())
}
