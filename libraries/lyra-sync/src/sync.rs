//! The sync orchestrator.
//!
//! One pass takes a set of music directories and reconciles the
//! database and covers directory against exactly the files found there:
//! scan concurrently, classify, read tags concurrently, normalize,
//! upsert sequentially, then invert-delete everything no longer backed
//! by a file.

use crate::error::{Result, SyncError};
use crate::events::SyncEvent;
use crate::normalize;
use crate::scanner;
use futures::future::join_all;
use lyra_artwork::CoverStore;
use lyra_core::path::normalize_slashes;
use lyra_core::{formats, Album, Artist, RawTrackMetadata, Track};
use lyra_metadata::LoftyMetadataReader;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Input for one sync pass.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Absolute music directories to scan
    pub directories: Vec<PathBuf>,
    /// Directory cover images are written to
    pub covers_directory: PathBuf,
}

/// A non-fatal failure collected during a sync pass.
///
/// Diagnostics never fail the sync; the affected item is simply absent
/// from the resulting library.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    /// A requested directory could not be scanned
    Scan {
        /// Normalized directory path
        directory: String,
        /// Failure reason
        reason: String,
    },
    /// An audio file could not be read
    Read {
        /// Normalized file path
        file_path: String,
        /// Failure reason
        reason: String,
    },
    /// An embedded cover could not be saved
    Cover {
        /// Normalized path of the track carrying the cover
        file_path: String,
        /// Failure reason
        reason: String,
    },
    /// A track could not be upserted
    Upsert {
        /// Normalized file path
        file_path: String,
        /// Failure reason
        reason: String,
    },
    /// One of the inverted deletes failed
    Delete {
        /// What was being deleted (tracks, artists, albums, covers)
        target: String,
        /// Failure reason
        reason: String,
    },
}

/// Result of a completed sync pass.
#[derive(Debug)]
pub struct SyncReport {
    /// Tracks added or updated in this pass (not the full listing)
    pub tracks: Vec<Track>,
    /// Complete artist listing after reconciliation
    pub artists: Vec<Artist>,
    /// Complete album listing after reconciliation
    pub albums: Vec<Album>,
    /// Non-fatal failures collected along the way
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy)]
enum SyncPhase {
    Validating,
    Scanning,
    Reading,
    Reconciling,
    Completed,
}

/// Drives one library synchronization pass.
pub struct SyncEngine {
    pool: SqlitePool,
    events: Option<mpsc::Sender<SyncEvent>>,
}

impl SyncEngine {
    /// Create an engine over an opened database pool.
    ///
    /// The pool's lifecycle belongs to the caller; the engine never
    /// closes it.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, events: None }
    }

    /// Attach a fire-and-forget notification channel.
    pub fn on_event(mut self, events: mpsc::Sender<SyncEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Run one sync pass.
    ///
    /// Item-level failures are absorbed into the report's diagnostics.
    /// Only validation errors and an unreachable persistence layer fail
    /// the pass. The start signal is sent once validation passes; an
    /// aborted pass emits only the failure.
    pub async fn sync(&self, request: &SyncRequest) -> Result<SyncReport> {
        trace_phase(SyncPhase::Validating);
        if let Err(e) = validate(request) {
            self.emit(SyncEvent::Failed {
                message: e.to_string(),
            });
            return Err(e);
        }

        self.emit(SyncEvent::Started);

        match self.run(request).await {
            Ok(report) => {
                self.emit(SyncEvent::Completed {
                    added: report.tracks.len(),
                    artists: report.artists.len(),
                    albums: report.albums.len(),
                });
                Ok(report)
            }
            Err(e) => {
                self.emit(SyncEvent::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run(&self, request: &SyncRequest) -> Result<SyncReport> {
        let mut diagnostics = Vec::new();

        trace_phase(SyncPhase::Scanning);
        let all_files = Self::scan_all(&request.directories, &mut diagnostics).await;

        let (supported, unsupported) = formats::classify(all_files);
        if !unsupported.is_empty() {
            tracing::debug!(count = unsupported.len(), "skipped unsupported files");
        }

        trace_phase(SyncPhase::Reading);
        let raw_tracks = Self::read_all(supported, &mut diagnostics).await;

        let covers = CoverStore::new(&request.covers_directory);
        if let Err(e) = covers.ensure_directory().await {
            tracing::warn!(error = %e, "covers directory unavailable");
            diagnostics.push(Diagnostic::Cover {
                file_path: normalize_slashes(&request.covers_directory),
                reason: e.to_string(),
            });
        }
        let normalized = join_all(
            raw_tracks
                .into_iter()
                .map(|raw| normalize::normalize(&covers, raw)),
        )
        .await;

        let mut tracks = Vec::with_capacity(normalized.len());
        for item in normalized {
            if let Some(reason) = item.cover_error {
                diagnostics.push(Diagnostic::Cover {
                    file_path: item.track.file_path.clone(),
                    reason,
                });
            }
            tracks.push(item.track);
        }

        trace_phase(SyncPhase::Reconciling);
        let report = self.reconcile(tracks, &covers, diagnostics).await?;

        trace_phase(SyncPhase::Completed);
        tracing::info!(
            added = report.tracks.len(),
            artists = report.artists.len(),
            albums = report.albums.len(),
            diagnostics = report.diagnostics.len(),
            "sync completed"
        );

        Ok(report)
    }

    /// Scan every requested directory concurrently.
    ///
    /// A directory that cannot be scanned becomes a diagnostic and
    /// never cancels its siblings.
    async fn scan_all(
        directories: &[PathBuf],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<String> {
        let handles: Vec<_> = directories
            .iter()
            .cloned()
            .map(|dir| tokio::task::spawn_blocking(move || scanner::scan_directory(&dir)))
            .collect();

        let mut all_files = Vec::new();
        for (dir, joined) in directories.iter().zip(join_all(handles).await) {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    diagnostics.push(Diagnostic::Scan {
                        directory: normalize_slashes(dir),
                        reason: format!("scan task failed: {e}"),
                    });
                    continue;
                }
            };

            match result {
                Ok(files) => {
                    tracing::debug!(directory = %dir.display(), files = files.len(), "scanned");
                    all_files.extend(files);
                }
                Err(e) => {
                    tracing::warn!(directory = %dir.display(), error = %e, "scan failed");
                    diagnostics.push(Diagnostic::Scan {
                        directory: normalize_slashes(dir),
                        reason: e.to_string(),
                    });
                }
            }
        }

        all_files
    }

    /// Read tags of every supported file concurrently.
    async fn read_all(
        file_paths: Vec<String>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<RawTrackMetadata> {
        let handles: Vec<_> = file_paths
            .iter()
            .cloned()
            .map(|file_path| {
                tokio::task::spawn_blocking(move || {
                    LoftyMetadataReader::new().read_raw(Path::new(&file_path))
                })
            })
            .collect();

        let mut raw_tracks = Vec::with_capacity(file_paths.len());
        for (file_path, joined) in file_paths.iter().zip(join_all(handles).await) {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    diagnostics.push(Diagnostic::Read {
                        file_path: file_path.clone(),
                        reason: format!("read task failed: {e}"),
                    });
                    continue;
                }
            };

            match result {
                Ok(raw) => raw_tracks.push(raw),
                Err(e) => {
                    tracing::warn!(file = %file_path, error = %e, "metadata read failed");
                    diagnostics.push(Diagnostic::Read {
                        file_path: file_path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        raw_tracks
    }

    /// Phase A sequential upserts, then the four inverted deletes.
    async fn reconcile(
        &self,
        tracks: Vec<Track>,
        covers: &CoverStore,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Result<SyncReport> {
        // Phase A. One at a time; SQLite serializes poorly under
        // concurrent write bursts.
        let mut added = Vec::new();
        let mut kept = Vec::with_capacity(tracks.len());
        for track in &tracks {
            match lyra_storage::tracks::upsert(&self.pool, track).await {
                Ok(outcome) => {
                    if outcome.changed {
                        added.push(outcome.track.clone());
                    }
                    kept.push(outcome.track);
                }
                Err(e) => {
                    tracing::warn!(file = %track.file_path, error = %e, "upsert failed");
                    diagnostics.push(Diagnostic::Upsert {
                        file_path: track.file_path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let kept_paths: Vec<String> = kept.iter().map(|t| t.file_path.clone()).collect();
        let artist_names: Vec<String> = kept
            .iter()
            .filter_map(|t| t.artist.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let album_names: Vec<String> = kept
            .iter()
            .filter_map(|t| t.album.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let referenced_covers: HashSet<String> =
            kept.iter().filter_map(|t| t.cover_path.clone()).collect();

        // Phase B. Tracks first, so the remaining-reference checks for
        // artists, albums and covers stay accurate.
        if let Err(e) = lyra_storage::tracks::delete_not_in(&self.pool, &kept_paths).await {
            tracing::warn!(error = %e, "track deletion failed");
            diagnostics.push(Diagnostic::Delete {
                target: "tracks".to_string(),
                reason: e.to_string(),
            });
        }

        let (artist_result, album_result, prune_result) = tokio::join!(
            lyra_storage::artists::delete_not_in(&self.pool, &artist_names),
            lyra_storage::albums::delete_not_in(&self.pool, &album_names),
            covers.prune(&referenced_covers),
        );

        if let Err(e) = artist_result {
            tracing::warn!(error = %e, "artist deletion failed");
            diagnostics.push(Diagnostic::Delete {
                target: "artists".to_string(),
                reason: e.to_string(),
            });
        }
        if let Err(e) = album_result {
            tracing::warn!(error = %e, "album deletion failed");
            diagnostics.push(Diagnostic::Delete {
                target: "albums".to_string(),
                reason: e.to_string(),
            });
        }
        match prune_result {
            Ok(outcome) => {
                for (cover, reason) in outcome.errors {
                    diagnostics.push(Diagnostic::Delete {
                        target: format!("cover {cover}"),
                        reason,
                    });
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "cover pruning failed");
                diagnostics.push(Diagnostic::Delete {
                    target: "covers".to_string(),
                    reason: e.to_string(),
                });
            }
        }

        // The report is built from the post-reconciliation database
        // state; an unreachable store here is the one fatal failure.
        let artists = lyra_storage::artists::get_all(&self.pool).await?;
        let albums = lyra_storage::albums::get_all(&self.pool).await?;

        Ok(SyncReport {
            tracks: added,
            artists,
            albums,
            diagnostics,
        })
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(events) = &self.events {
            if let Err(e) = events.try_send(event) {
                tracing::debug!(error = %e, "sync event dropped");
            }
        }
    }
}

fn trace_phase(phase: SyncPhase) {
    tracing::debug!(phase = ?phase, "sync phase");
}

/// Abort before any filesystem work on malformed input.
fn validate(request: &SyncRequest) -> Result<()> {
    if request.directories.is_empty() {
        return Err(SyncError::NoDirectories);
    }

    for dir in &request.directories {
        if !dir.is_absolute() {
            return Err(SyncError::RelativeDirectory(normalize_slashes(dir)));
        }
    }

    Ok(())
}
