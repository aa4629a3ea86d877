//! Error taxonomy for the scraping pipeline.
//!
//! Transient network failures are retried with backoff and only surface
//! as [`FetchError::Exhausted`] once the attempt budget is spent.
//! Extraction failures signal a source-site layout change and are never
//! retried.

use reqwest::StatusCode;
use thiserror::Error;

/// A single failed request attempt, recoverable by retry.
#[derive(Debug, Error)]
pub enum TransientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// A fetch whose retry budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("giving up on {url} after {attempts} attempts: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        source: TransientError,
    },
}

/// A required structural element was absent from parsed markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("malformed list page: {0}")]
    MalformedListPage(&'static str),
    #[error("malformed movie page: {0}")]
    MalformedMoviePage(&'static str),
}
