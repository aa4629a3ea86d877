//! Full ingestion run: ranked list, movie pages, persistence.
//!
//! List-level failures abort the run, movie-level failures only skip
//! that movie. Workers fetch and parse movie pages in parallel while
//! persistence stays sequential, one transaction per movie.

use std::collections::VecDeque;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use url::Url;

use crate::repository::{DieselError, MovieRepository};
use crate::scrapers::extract::{extract_movie_links, extract_movie_page};
use crate::scrapers::{ExtractError, FetchError, HttpClient, ScrapedMovie};

/// What to do with existing data before a new run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WipeDecision {
    /// Wipe the store and proceed.
    Wipe,
    /// Keep the store and abort the run.
    Keep,
    /// The answer was not understood; abort with an error.
    Unrecognized(String),
}

impl WipeDecision {
    /// Interpret a raw prompt answer, case-insensitively.
    ///
    /// `y` wipes, an empty answer or `n` keeps, anything else is
    /// unrecognized.
    pub fn parse(input: &str) -> Self {
        let answer = input.trim();
        match answer.to_lowercase().as_str() {
            "y" => WipeDecision::Wipe,
            "" | "n" => WipeDecision::Keep,
            _ => WipeDecision::Unrecognized(answer.to_string()),
        }
    }
}

/// Counters for a completed ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Movies found on the ranked list.
    pub listed: usize,
    /// Movies fetched, parsed, and persisted.
    pub persisted: usize,
    /// Movies dropped after their fetch or parse failed.
    pub skipped: usize,
}

/// Result of an ingestion run that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Completed(IngestStats),
    /// The user chose to keep existing data; nothing was touched.
    Aborted,
}

/// Fatal ingestion failure.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to fetch ranked list: {0}")]
    ListFetch(#[from] FetchError),
    #[error("failed to parse ranked list: {0}")]
    ListParse(#[from] ExtractError),
    #[error("unrecognized answer {0:?}, aborting without changes")]
    UnrecognizedAnswer(String),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("database error: {0}")]
    Db(#[from] DieselError),
}

/// Orchestrates a full scrape-and-persist run.
pub struct IngestService {
    repo: MovieRepository,
    client: HttpClient,
    base_url: Url,
    list_path: String,
}

impl IngestService {
    /// Create an ingest service for the given source site.
    pub fn new(
        repo: MovieRepository,
        client: HttpClient,
        base_url: &str,
        list_path: &str,
    ) -> Result<Self, IngestError> {
        Ok(Self {
            repo,
            client,
            base_url: Url::parse(base_url)?,
            list_path: list_path.to_string(),
        })
    }

    /// Run a full ingestion with `workers` parallel movie fetchers.
    ///
    /// When the store already holds data, `confirm_wipe` decides whether
    /// to wipe it first or abort. The callback runs before any network
    /// traffic.
    pub async fn run<F>(&self, workers: usize, confirm_wipe: F) -> Result<IngestOutcome, IngestError>
    where
        F: FnOnce() -> WipeDecision,
    {
        if !self.repo.is_empty().await? {
            match confirm_wipe() {
                WipeDecision::Wipe => {
                    info!("wiping existing data before ingest");
                    self.repo.wipe().await?;
                }
                WipeDecision::Keep => {
                    info!("keeping existing data, run aborted");
                    return Ok(IngestOutcome::Aborted);
                }
                WipeDecision::Unrecognized(answer) => {
                    return Err(IngestError::UnrecognizedAnswer(answer));
                }
            }
        }

        let list_url = self.base_url.join(&self.list_path)?;
        info!("fetching ranked list from {}", list_url);
        let markup = self.client.get_text(list_url.as_str()).await?;
        let links = extract_movie_links(&markup)?;
        let listed = links.len();
        info!("ranked list holds {} movies", listed);

        let movies = self.fetch_movies(links, workers).await;

        let mut persisted = 0usize;
        for movie in &movies {
            let movie_id = self.repo.create_movie_with_actors(movie).await?;
            debug!("persisted movie {:?} as id {}", movie.name, movie_id);
            persisted += 1;
        }

        let stats = IngestStats {
            listed,
            persisted,
            skipped: listed - persisted,
        };
        info!(
            "ingest finished: {} listed, {} persisted, {} skipped",
            stats.listed, stats.persisted, stats.skipped
        );
        Ok(IngestOutcome::Completed(stats))
    }

    /// Fetch and parse movie pages through a bounded worker pool.
    ///
    /// Results come back in list order; movies whose fetch or parse
    /// failed are dropped.
    async fn fetch_movies(&self, links: Vec<String>, workers: usize) -> Vec<ScrapedMovie> {
        let total = links.len();
        let queue: Arc<Mutex<VecDeque<(usize, String)>>> =
            Arc::new(Mutex::new(links.into_iter().enumerate().collect()));
        let (tx, mut rx) = mpsc::channel::<(usize, Option<ScrapedMovie>)>(total.max(1));

        let worker_count = workers.max(1).min(total.max(1));
        for _ in 0..worker_count {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let client = self.client.clone();
            let base_url = self.base_url.clone();

            tokio::spawn(async move {
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((index, href)) = next else { break };
                    let movie = fetch_and_parse_movie(&client, &base_url, &href).await;
                    if tx.send((index, movie)).await.is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let mut slots: Vec<Option<ScrapedMovie>> = Vec::new();
        slots.resize_with(total, || None);
        while let Some((index, movie)) = rx.recv().await {
            slots[index] = movie;
        }
        slots.into_iter().flatten().collect()
    }
}

/// Fetch one movie page and extract its title and cast.
///
/// Every failure is logged and collapses to `None` so a single bad
/// movie never takes down the run.
async fn fetch_and_parse_movie(
    client: &HttpClient,
    base_url: &Url,
    href: &str,
) -> Option<ScrapedMovie> {
    let url = match base_url.join(href) {
        Ok(url) => url,
        Err(e) => {
            warn!("skipping movie with unusable href {:?}: {}", href, e);
            return None;
        }
    };

    let markup = match client.get_text(url.as_str()).await {
        Ok(markup) => markup,
        Err(e) => {
            warn!("skipping movie: {}", e);
            return None;
        }
    };

    match extract_movie_page(&markup) {
        Ok(movie) => Some(movie),
        Err(e) => {
            warn!("skipping movie at {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wipe_decision_parse() {
        assert_eq!(WipeDecision::parse("y"), WipeDecision::Wipe);
        assert_eq!(WipeDecision::parse("y\n"), WipeDecision::Wipe);
        assert_eq!(WipeDecision::parse("Y"), WipeDecision::Wipe);
        assert_eq!(WipeDecision::parse(""), WipeDecision::Keep);
        assert_eq!(WipeDecision::parse("\n"), WipeDecision::Keep);
        assert_eq!(WipeDecision::parse("n"), WipeDecision::Keep);
        assert_eq!(WipeDecision::parse("N"), WipeDecision::Keep);
        assert_eq!(
            WipeDecision::parse("yes please"),
            WipeDecision::Unrecognized("yes please".to_string())
        );
    }
}
