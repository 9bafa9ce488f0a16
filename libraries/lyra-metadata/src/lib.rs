//! Lyra Metadata
//!
//! Tag reading for the library synchronization engine.
//!
//! Reads title/artist/album/track-number, duration and the embedded
//! cover image from audio files (MP3, FLAC, OGG, WAV, AAC, OPUS, M4A)
//! into the transient [`lyra_core::RawTrackMetadata`] shape.
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_metadata::LoftyMetadataReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), lyra_metadata::MetadataError> {
//! let reader = LoftyMetadataReader::new();
//! let raw = reader.read_raw(Path::new("/music/song.mp3"))?;
//! println!("{:?} by {:?}", raw.title, raw.artist);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod reader;

pub use error::{MetadataError, Result};
pub use reader::LoftyMetadataReader;
