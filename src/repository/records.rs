//! Diesel row records and conversions to domain models.

use diesel::prelude::*;

use super::parse_datetime;
use crate::models::{Actor, Movie};
use crate::schema::{actors, movies};

/// Database record for a movie row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = movies)]
pub struct MovieRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: String,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Movie {
            id: record.id,
            name: record.name,
            slug: record.slug,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Database record for an actor row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = actors)]
pub struct ActorRecord {
    pub id: i32,
    pub name: String,
    pub csfd_id: String,
    pub slug: String,
    pub created_at: String,
}

impl From<ActorRecord> for Actor {
    fn from(record: ActorRecord) -> Self {
        Actor {
            id: record.id,
            name: record.name,
            csfd_id: record.csfd_id,
            slug: record.slug,
            created_at: parse_datetime(&record.created_at),
        }
    }
}
