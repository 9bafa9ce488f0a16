use thiserror::Error;

/// Errors that can occur while persisting cover images
#[derive(Debug, Error)]
pub enum CoverError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cover store operations
pub type Result<T> = std::result::Result<T, CoverError>;

impl From<CoverError> for lyra_core::LyraError {
    fn from(err: CoverError) -> Self {
        lyra_core::LyraError::cover(err.to_string())
    }
}
