//! Actor model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single actor entity, related to movies many-to-many.
///
/// Actors are deduplicated across movies by `csfd_id`, the identifier
/// scraped from the actor's profile URL, so a display-name collision
/// between two real people never merges them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Database row ID.
    pub id: i32,
    /// Display name as scraped from the source site.
    pub name: String,
    /// External identifier from the source site, unique within the store.
    pub csfd_id: String,
    /// URL-safe identifier in the form `{id}-{slugified name}`.
    pub slug: String,
    /// When this actor was first persisted by the ingestion pipeline.
    pub created_at: DateTime<Utc>,
}
