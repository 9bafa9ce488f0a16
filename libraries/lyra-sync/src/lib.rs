//! Lyra Sync
//!
//! The library synchronization engine: turns a set of music directories
//! into a consistent database and covers-directory state.
//!
//! One pass runs as a pipeline:
//! 1. Scan every directory concurrently ([`scanner`])
//! 2. Partition paths into supported and unsupported audio files
//! 3. Read tags of supported files concurrently (`lyra-metadata`)
//! 4. Normalize tag data and persist embedded covers ([`normalize`])
//! 5. Upsert tracks sequentially, then invert-delete tracks, artists,
//!    albums and cover files no longer backed by a scanned file
//!
//! Item-level failures are collected as [`Diagnostic`]s; only input
//! validation and an unreachable database fail a pass.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod events;
pub mod normalize;
pub mod scanner;
mod sync;

pub use error::{Result, ScanError, SyncError};
pub use events::SyncEvent;
pub use sync::{Diagnostic, SyncEngine, SyncReport, SyncRequest};
