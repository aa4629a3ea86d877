//! Service layer orchestrating scraping and persistence.

pub mod ingest;

pub use ingest::{IngestError, IngestOutcome, IngestService, IngestStats, WipeDecision};
