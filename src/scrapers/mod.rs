//! Scraping pipeline: HTTP fetching and HTML extraction.

pub mod error;
pub mod extract;
mod http_client;

pub use error::{ExtractError, FetchError, TransientError};
pub use http_client::HttpClient;

/// An actor as scraped from a movie page's cast listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedActor {
    /// Display text of the actor anchor.
    pub name: String,
    /// External identifier derived from the actor's profile URL.
    pub csfd_id: String,
}

/// A movie as scraped from its detail page.
///
/// Actors keep the order in which they appear on the page; the
/// extractor does not deduplicate repeated cast entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedMovie {
    /// Movie title, trimmed of surrounding whitespace.
    pub name: String,
    /// Starring actors in document order.
    pub actors: Vec<ScrapedActor>,
}
