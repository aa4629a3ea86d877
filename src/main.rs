//! filmrank - top-rated movie and cast ingestion.
//!
//! Scrapes the ranked movie list from the ČSFD movie database, fetches
//! each movie page in parallel, and persists movies with their starring
//! actors into a local SQLite database.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if filmrank::cli::is_verbose() {
        "filmrank=debug"
    } else {
        "filmrank=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    filmrank::cli::run().await
}
