/// Core error types for Lyra
use thiserror::Error;

/// Result type alias using `LyraError`
pub type Result<T> = std::result::Result<T, LyraError>;

/// Core error type for Lyra
#[derive(Error, Debug)]
pub enum LyraError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Cover image persistence errors
    #[error("Cover error: {0}")]
    Cover(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl LyraError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a cover error
    pub fn cover(msg: impl Into<String>) -> Self {
        Self::Cover(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
