//! Movie model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single movie entity.
///
/// Names are not unique since unrelated movies can share a title; the
/// slug carries the row id to stay unique regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Database row ID.
    pub id: i32,
    /// Display name as scraped from the source site.
    pub name: String,
    /// URL-safe identifier in the form `{id}-{slugified name}`.
    pub slug: String,
    /// When this movie was persisted by the ingestion pipeline.
    pub created_at: DateTime<Utc>,
}
