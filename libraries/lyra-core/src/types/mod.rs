//! Domain types for the library synchronization engine.

mod album;
mod artist;
mod track;

pub use album::Album;
pub use artist::Artist;
pub use track::{EmbeddedPicture, RawTrackMetadata, Track};
