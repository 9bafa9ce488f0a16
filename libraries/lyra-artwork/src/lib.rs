//! Content-addressed cover image storage.
//!
//! Covers extracted from audio files are written to a single directory,
//! named by the SHA-256 of their bytes, and pruned when no track
//! references them anymore.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod store;

pub use error::{CoverError, Result};
pub use store::{CoverStore, PruneOutcome};
