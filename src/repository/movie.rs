//! Movie and actor repository - the persistence gateway consumed by the
//! ingestion pipeline.
//!
//! Movies are always newly created; actors are deduplicated by their
//! external identifier and reused across movies. Each movie is written
//! inside its own transaction, so a later failure never undoes an
//! earlier commit.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{ActorRecord, MovieRecord};
use crate::models::{Actor, Movie};
use crate::schema::{actors, movie_actors, movies};
use crate::scrapers::ScrapedMovie;
use crate::utils::entity_slug;

/// Repository for movies, actors, and their links.
#[derive(Clone)]
pub struct MovieRepository {
    pool: AsyncSqlitePool,
}

impl MovieRepository {
    /// Create a new movie repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Check whether the store holds no movies and no actors.
    pub async fn is_empty(&self) -> Result<bool, DieselError> {
        Ok(self.movie_count().await? == 0 && self.actor_count().await? == 0)
    }

    /// Delete all movies, actors, and links.
    pub async fn wipe(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(movie_actors::table).execute(&mut conn).await?;
        diesel::delete(movies::table).execute(&mut conn).await?;
        diesel::delete(actors::table).execute(&mut conn).await?;

        Ok(())
    }

    /// Count persisted movies.
    pub async fn movie_count(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;
        movies::table.count().get_result(&mut conn).await
    }

    /// Count persisted actors.
    pub async fn actor_count(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;
        actors::table.count().get_result(&mut conn).await
    }

    /// Atomically create a movie, create-or-reuse its actors, and link them.
    ///
    /// Actors whose external identifier already exists in the store are
    /// reused instead of duplicated. An actor listed twice in one cast
    /// sequence is linked once. Slugs are assigned inside the same
    /// transaction from the generated row ids. Returns the movie id.
    pub async fn create_movie_with_actors(
        &self,
        scraped: &ScrapedMovie,
    ) -> Result<i32, DieselError> {
        let mut conn = self.pool.get().await?;
        let scraped = scraped.clone();

        conn.transaction(|conn| {
            Box::pin(async move {
                let now = Utc::now().to_rfc3339();

                let mut actor_ids = Vec::with_capacity(scraped.actors.len());
                for actor in &scraped.actors {
                    let existing: Option<i32> = actors::table
                        .filter(actors::csfd_id.eq(&actor.csfd_id))
                        .select(actors::id)
                        .first(conn)
                        .await
                        .optional()?;

                    let actor_id = match existing {
                        Some(id) => id,
                        None => {
                            let id: i32 = diesel::insert_into(actors::table)
                                .values((
                                    actors::name.eq(&actor.name),
                                    actors::csfd_id.eq(&actor.csfd_id),
                                    actors::created_at.eq(&now),
                                ))
                                .returning(actors::id)
                                .get_result(conn)
                                .await?;
                            diesel::update(actors::table.find(id))
                                .set(actors::slug.eq(entity_slug(id, &actor.name)))
                                .execute(conn)
                                .await?;
                            id
                        }
                    };
                    actor_ids.push(actor_id);
                }

                let movie_id: i32 = diesel::insert_into(movies::table)
                    .values((
                        movies::name.eq(&scraped.name),
                        movies::created_at.eq(&now),
                    ))
                    .returning(movies::id)
                    .get_result(conn)
                    .await?;
                diesel::update(movies::table.find(movie_id))
                    .set(movies::slug.eq(entity_slug(movie_id, &scraped.name)))
                    .execute(conn)
                    .await?;

                for actor_id in actor_ids {
                    diesel::insert_or_ignore_into(movie_actors::table)
                        .values((
                            movie_actors::movie_id.eq(movie_id),
                            movie_actors::actor_id.eq(actor_id),
                        ))
                        .execute(conn)
                        .await?;
                }

                Ok(movie_id)
            })
        })
        .await
    }

    /// Search movies and actors by case-insensitive name substring.
    ///
    /// The query is matched literally; `%` and `_` in it carry no
    /// wildcard meaning. An empty or whitespace-only query yields no
    /// results.
    pub async fn search(&self, query: &str) -> Result<(Vec<Movie>, Vec<Actor>), DieselError> {
        if query.trim().is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let pattern = format!("%{}%", escape_like(query));
        let mut conn = self.pool.get().await?;

        let movies = movies::table
            .filter(movies::name.like(&pattern).escape('\\'))
            .order(movies::slug.asc())
            .load::<MovieRecord>(&mut conn)
            .await?
            .into_iter()
            .map(Movie::from)
            .collect();

        let actors = actors::table
            .filter(actors::name.like(&pattern).escape('\\'))
            .order(actors::slug.asc())
            .load::<ActorRecord>(&mut conn)
            .await?
            .into_iter()
            .map(Actor::from)
            .collect();

        Ok((movies, actors))
    }

    /// Find a movie by its slug.
    pub async fn movie_by_slug(&self, slug: &str) -> Result<Option<Movie>, DieselError> {
        let mut conn = self.pool.get().await?;

        movies::table
            .filter(movies::slug.eq(slug))
            .first::<MovieRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Movie::from))
    }

    /// Find an actor by their slug.
    pub async fn actor_by_slug(&self, slug: &str) -> Result<Option<Actor>, DieselError> {
        let mut conn = self.pool.get().await?;

        actors::table
            .filter(actors::slug.eq(slug))
            .first::<ActorRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Actor::from))
    }

    /// Actors starring in a movie, in creation (link) order.
    pub async fn actors_for_movie(&self, movie_id: i32) -> Result<Vec<Actor>, DieselError> {
        let mut conn = self.pool.get().await?;

        movie_actors::table
            .inner_join(actors::table)
            .filter(movie_actors::movie_id.eq(movie_id))
            .select(ActorRecord::as_select())
            .order(actors::id.asc())
            .load::<ActorRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Actor::from).collect())
    }

    /// Movies an actor stars in, ordered by slug.
    pub async fn movies_for_actor(&self, actor_id: i32) -> Result<Vec<Movie>, DieselError> {
        let mut conn = self.pool.get().await?;

        movie_actors::table
            .inner_join(movies::table)
            .filter(movie_actors::actor_id.eq(actor_id))
            .select(MovieRecord::as_select())
            .order(movies::slug.asc())
            .load::<MovieRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Movie::from).collect())
    }
}

/// Escape LIKE metacharacters so a query matches only literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::DbContext;
    use crate::scrapers::ScrapedActor;
    use tempfile::tempdir;

    async fn setup_test_db() -> (MovieRepository, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        (ctx.movies(), dir)
    }

    fn scraped(name: &str, actors: &[(&str, &str)]) -> ScrapedMovie {
        ScrapedMovie {
            name: name.to_string(),
            actors: actors
                .iter()
                .map(|(name, csfd_id)| ScrapedActor {
                    name: name.to_string(),
                    csfd_id: csfd_id.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_movie_with_actors() {
        let (repo, _dir) = setup_test_db().await;

        let movie_id = repo
            .create_movie_with_actors(&scraped(
                "The Godfather",
                &[("Marlon Brando", "64"), ("Al Pacino", "5")],
            ))
            .await
            .unwrap();

        assert_eq!(repo.movie_count().await.unwrap(), 1);
        assert_eq!(repo.actor_count().await.unwrap(), 2);

        let actors = repo.actors_for_movie(movie_id).await.unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].name, "Marlon Brando");
        assert_eq!(actors[0].slug, format!("{}-marlon-brando", actors[0].id));
        assert_eq!(actors[1].csfd_id, "5");

        let movie = repo
            .movie_by_slug(&format!("{}-the-godfather", movie_id))
            .await
            .unwrap()
            .expect("movie by slug");
        assert_eq!(movie.name, "The Godfather");
    }

    #[tokio::test]
    async fn test_actors_are_reused_across_movies() {
        let (repo, _dir) = setup_test_db().await;

        let mut first: Vec<(String, String)> = (0..5)
            .map(|i| (format!("Actor {}", i), format!("{}", i)))
            .collect();
        let common: Vec<(String, String)> = (100..105)
            .map(|i| (format!("Actor {}", i), format!("{}", i)))
            .collect();
        first.extend(common.clone());

        let mut second: Vec<(String, String)> = (5..10)
            .map(|i| (format!("Actor {}", i), format!("{}", i)))
            .collect();
        second.extend(common);

        fn as_refs(v: &[(String, String)]) -> Vec<(&str, &str)> {
            v.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect()
        }

        let a = repo
            .create_movie_with_actors(&scraped("Alpha", &as_refs(&first)))
            .await
            .unwrap();
        let b = repo
            .create_movie_with_actors(&scraped("Beta", &as_refs(&second)))
            .await
            .unwrap();

        assert_eq!(repo.movie_count().await.unwrap(), 2);
        // 5 + 5 unique plus 5 shared, not 20
        assert_eq!(repo.actor_count().await.unwrap(), 15);
        assert_eq!(repo.actors_for_movie(a).await.unwrap().len(), 10);
        assert_eq!(repo.actors_for_movie(b).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_duplicate_actor_in_one_cast_links_once() {
        let (repo, _dir) = setup_test_db().await;

        let movie_id = repo
            .create_movie_with_actors(&scraped(
                "Dvojrole",
                &[("Jan Novák", "7"), ("Jan Novák", "7")],
            ))
            .await
            .unwrap();

        assert_eq!(repo.actor_count().await.unwrap(), 1);
        assert_eq!(repo.actors_for_movie(movie_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_named_movies_get_distinct_slugs() {
        let (repo, _dir) = setup_test_db().await;

        let a = repo
            .create_movie_with_actors(&scraped("Remake", &[]))
            .await
            .unwrap();
        let b = repo
            .create_movie_with_actors(&scraped("Remake", &[]))
            .await
            .unwrap();

        let first = repo
            .movie_by_slug(&format!("{}-remake", a))
            .await
            .unwrap()
            .expect("first remake");
        let second = repo
            .movie_by_slug(&format!("{}-remake", b))
            .await
            .unwrap()
            .expect("second remake");
        assert_ne!(first.slug, second.slug);
    }

    #[tokio::test]
    async fn test_is_empty_and_wipe() {
        let (repo, _dir) = setup_test_db().await;
        assert!(repo.is_empty().await.unwrap());

        repo.create_movie_with_actors(&scraped("Alpha", &[("Actor", "1")]))
            .await
            .unwrap();
        assert!(!repo.is_empty().await.unwrap());

        repo.wipe().await.unwrap();
        assert!(repo.is_empty().await.unwrap());
        assert_eq!(repo.movie_count().await.unwrap(), 0);
        assert_eq!(repo.actor_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search() {
        let (repo, _dir) = setup_test_db().await;

        repo.create_movie_with_actors(&scraped(
            "Very Specific and Unique Name",
            &[("Very Specific and Unique Name", "1"), ("Someone Else", "2")],
        ))
        .await
        .unwrap();
        repo.create_movie_with_actors(&scraped("Unrelated", &[]))
            .await
            .unwrap();

        let (movies, actors) = repo.search("y specific a").await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].name, "Very Specific and Unique Name");
        assert_eq!(actors.len(), 1);

        let (movies, actors) = repo.search("no such thing").await.unwrap();
        assert!(movies.is_empty());
        assert!(actors.is_empty());

        let (movies, actors) = repo.search("   ").await.unwrap();
        assert!(movies.is_empty());
        assert!(actors.is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_metacharacters_literally() {
        let (repo, _dir) = setup_test_db().await;

        repo.create_movie_with_actors(&scraped("100% Wolf", &[]))
            .await
            .unwrap();
        repo.create_movie_with_actors(&scraped("1000 Wolves", &[]))
            .await
            .unwrap();
        repo.create_movie_with_actors(&scraped("M_A_S_H", &[]))
            .await
            .unwrap();

        let (movies, _) = repo.search("100%").await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].name, "100% Wolf");

        let (movies, _) = repo.search("_A_").await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].name, "M_A_S_H");
    }

    #[tokio::test]
    async fn test_lookup_by_missing_slug() {
        let (repo, _dir) = setup_test_db().await;
        assert!(repo
            .movie_by_slug("random-not-existing-slug")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .actor_by_slug("random-not-existing-slug")
            .await
            .unwrap()
            .is_none());
    }
}
