//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Settings, DEFAULT_WORKERS};

mod commands;

#[derive(Parser)]
#[command(name = "filmrank")]
#[command(about = "Scrape top-rated movies and their casts into SQLite", version)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,
    /// Scrape the ranked movie list and persist movies with their casts
    Scrape {
        /// Number of parallel movie page workers
        #[arg(short = 'n', long, default_value_t = DEFAULT_WORKERS)]
        num_workers: usize,
    },
    /// Show database location and record counts
    Status,
    /// Search movies and actors by name substring
    Search {
        /// Case-insensitive name fragment
        query: String,
    },
}

/// Check whether verbose logging was requested, before clap runs.
///
/// Called during logger setup, so it peeks at the raw arguments instead
/// of the parsed ones.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and dispatch to the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // verbose is consumed by is_verbose() during logger setup
    let _ = cli.verbose;
    let settings = Settings::load(cli.config.as_deref(), cli.database.as_deref())?;

    match cli.command {
        Commands::Init => commands::init::run(&settings).await,
        Commands::Scrape { num_workers } => commands::scrape::run(&settings, num_workers).await,
        Commands::Status => commands::status::run(&settings).await,
        Commands::Search { query } => commands::search::run(&settings, &query).await,
    }
}
