/// Artist domain type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An artist, identified by name.
///
/// Exists implicitly: created when the first referencing track is
/// upserted and removed when no surviving track references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist name (identity key)
    pub name: String,

    /// When the artist first appeared in the library
    pub created_at: DateTime<Utc>,
}
