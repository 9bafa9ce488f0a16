/// Album domain type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An album, identified by name.
///
/// Follows the same existence rule as [`super::Artist`]. The cover is
/// taken from the first track that introduced the album and is not
/// rewritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Album name (identity key)
    pub name: String,

    /// Artist the album was first seen with
    pub artist_name: Option<String>,

    /// Cover image path set when the album was first seen
    pub cover_path: Option<String>,

    /// When the album first appeared in the library
    pub created_at: DateTime<Utc>,
}
