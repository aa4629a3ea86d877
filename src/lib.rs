//! Library crate for filmrank.
//!
//! The scraping pipeline lives in [`scrapers`] (pure HTML extraction and
//! the retrying HTTP client) and [`services`] (the ingestion
//! orchestrator). Persistence goes through [`repository`], backed by
//! Diesel over SQLite.

pub mod cli;
pub mod config;
pub mod models;
pub mod repository;
pub mod schema;
pub mod scrapers;
pub mod services;
pub mod utils;
