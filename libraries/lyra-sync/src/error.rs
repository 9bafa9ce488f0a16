//! Error types for the synchronization engine.

use thiserror::Error;

/// Fatal synchronization errors.
///
/// Per-directory, per-file, per-cover and per-delete failures are NOT
/// represented here; they are collected as [`crate::Diagnostic`]s and
/// never fail the sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The directory list was empty; nothing to sync
    #[error("no directories to sync")]
    NoDirectories,

    /// A requested directory path was not absolute
    #[error("directory path is not absolute: {0}")]
    RelativeDirectory(String),

    /// The persistence layer is unreachable
    #[error(transparent)]
    Storage(#[from] lyra_storage::StorageError),
}

/// Per-directory scan failure.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The requested directory does not exist
    #[error("directory not found: {0}")]
    NotFound(String),

    /// The requested path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(String),
}

/// Convenience result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
