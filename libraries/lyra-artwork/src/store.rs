use crate::error::Result;
use lyra_core::{path::normalize_slashes, EmbeddedPicture};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Content-addressed store for extracted cover images.
///
/// The SHA-256 of the image bytes picks the file name, so two tracks
/// with byte-identical embedded art share one file on disk.
pub struct CoverStore {
    directory: PathBuf,
}

/// Outcome of pruning the covers directory.
#[derive(Debug, Default)]
pub struct PruneOutcome {
    /// Number of files removed
    pub removed: usize,
    /// Per-file deletion failures as (path, reason)
    pub errors: Vec<(String, String)>,
}

impl CoverStore {
    /// Create a store rooted at the given covers directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The covers directory this store writes to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the covers directory if it does not exist yet.
    pub async fn ensure_directory(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    /// Hex SHA-256 content identity of image bytes.
    pub fn content_id(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Persist an embedded picture, deduplicating by content.
    ///
    /// Returns the normalized path of the cover file. An already
    /// existing file with the same content identity is returned without
    /// rewriting.
    pub async fn get_or_save(&self, picture: &EmbeddedPicture) -> Result<String> {
        let file_name = format!(
            "{}.{}",
            Self::content_id(&picture.data),
            extension_for(picture.mime_type.as_deref())
        );
        let path = self.directory.join(file_name);
        let normalized = normalize_slashes(&path);

        if tokio::fs::try_exists(&path).await? {
            return Ok(normalized);
        }

        tokio::fs::write(&path, &picture.data).await?;
        tracing::debug!(cover = %normalized, "saved new cover");

        Ok(normalized)
    }

    /// Delete every file in the covers directory not in `referenced`.
    ///
    /// Deletion failures are collected per file; they never abort the
    /// rest of the prune. A missing directory prunes to nothing.
    pub async fn prune(&self, referenced: &HashSet<String>) -> Result<PruneOutcome> {
        let mut outcome = PruneOutcome::default();

        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(outcome),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let normalized = normalize_slashes(&path);
            if referenced.contains(&normalized) {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => outcome.removed += 1,
                Err(e) => {
                    tracing::warn!(cover = %normalized, error = %e, "failed to delete cover");
                    outcome.errors.push((normalized, e.to_string()));
                }
            }
        }

        Ok(outcome)
    }
}

/// File extension for a cover MIME type, defaulting to jpg.
fn extension_for(mime_type: Option<&str>) -> &'static str {
    match mime_type {
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/bmp") => "bmp",
        Some("image/tiff") => "tiff",
        _ => "jpg",
    }
}
