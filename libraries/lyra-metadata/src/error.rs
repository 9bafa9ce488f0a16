/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Tag parsing error, tagged with the originating file
    #[error("Failed to parse {path}: {reason}")]
    Parse {
        /// Normalized path of the file that failed
        path: String,
        /// Underlying parser message
        reason: String,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for lyra_core::LyraError {
    fn from(err: MetadataError) -> Self {
        lyra_core::LyraError::metadata(err.to_string())
    }
}
