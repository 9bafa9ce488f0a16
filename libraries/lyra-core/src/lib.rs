//! Lyra Core
//!
//! Domain types, error handling and the pure helpers shared by the
//! library synchronization engine.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `Artist`, `Album`, `RawTrackMetadata`
//! - **Path Classification**: supported/unsupported audio file partition
//! - **Error Handling**: unified `LyraError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lyra_core::formats::classify;
//!
//! let (supported, unsupported) = classify(vec![
//!     "/music/a.mp3".to_string(),
//!     "/music/cover.png".to_string(),
//! ]);
//! assert_eq!(supported, ["/music/a.mp3"]);
//! assert_eq!(unsupported, ["/music/cover.png"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod formats;
pub mod path;
pub mod types;

// Re-export commonly used types
pub use error::{LyraError, Result};
pub use types::{Album, Artist, EmbeddedPicture, RawTrackMetadata, Track};
