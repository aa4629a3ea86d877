//! `scrape` command: run a full ingestion.

use std::io::{self, Write};

use console::style;

use crate::config::Settings;
use crate::scrapers::HttpClient;
use crate::services::{IngestOutcome, IngestService, WipeDecision};

pub async fn run(settings: &Settings, num_workers: usize) -> anyhow::Result<()> {
    settings.ensure_parent_dir()?;
    let db = settings.create_db_context();
    db.init_schema().await?;

    let client = HttpClient::new(
        &settings.user_agent,
        settings.request_timeout,
        settings.retry_attempts,
        settings.retry_base_delay,
    );
    let service = IngestService::new(db.movies(), client, &settings.base_url, &settings.list_path)?;

    match service.run(num_workers, prompt_for_wipe).await? {
        IngestOutcome::Completed(stats) => {
            println!(
                "{} persisted {} of {} movies ({} skipped)",
                style("✓").green(),
                stats.persisted,
                stats.listed,
                stats.skipped
            );
        }
        IngestOutcome::Aborted => {
            println!("{} existing data kept, nothing scraped", style("-").yellow());
        }
    }
    Ok(())
}

/// Ask on stdin whether existing data may be wiped.
fn prompt_for_wipe() -> WipeDecision {
    print!("The database already contains data. Wipe it and scrape again? [y/N] ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return WipeDecision::Keep;
    }
    WipeDecision::parse(&answer)
}
