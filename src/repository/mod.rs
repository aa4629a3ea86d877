//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! over SQLite, wrapped by diesel-async for an async interface.

mod context;
mod movie;
mod pool;
mod records;

pub use context::DbContext;
pub use movie::MovieRepository;
pub use pool::{AsyncSqlitePool, DieselError};

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            tracing::warn!("unparseable created_at {:?}, falling back to epoch: {}", s, e);
            DateTime::UNIX_EPOCH
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2024-05-01T12:00:00+00:00");
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        assert_eq!(parse_datetime("not a date"), DateTime::UNIX_EPOCH);
        assert_eq!(parse_datetime(""), DateTime::UNIX_EPOCH);
    }
}
