//! Database context managing the connection factory and schema setup.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::movie::MovieRepository;
use super::pool::{AsyncSqlitePool, DieselError};

/// Database context providing repository access.
///
/// Create one context per command, then use it to access repositories.
#[derive(Clone)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a new database context from a file path.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Create a new database context from a database URL.
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    /// Get the movie repository.
    pub fn movies(&self) -> MovieRepository {
        MovieRepository::new(self.pool.clone())
    }

    /// Initialize the database schema, creating tables if needed.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        conn.batch_execute(
            r#"
            -- Movies table; names are not unique, slugs embed the id
            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                slug TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_movies_slug ON movies(slug);

            -- Actors table, deduplicated by external identifier
            CREATE TABLE IF NOT EXISTS actors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                csfd_id TEXT NOT NULL UNIQUE,
                slug TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_actors_slug ON actors(slug);

            -- Movie <-> actor many-to-many links
            CREATE TABLE IF NOT EXISTS movie_actors (
                movie_id INTEGER NOT NULL,
                actor_id INTEGER NOT NULL,
                PRIMARY KEY (movie_id, actor_id),
                FOREIGN KEY (movie_id) REFERENCES movies(id),
                FOREIGN KEY (actor_id) REFERENCES actors(id)
            );
            "#,
        )
        .await?;

        Ok(())
    }
}
