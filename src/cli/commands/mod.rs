//! Command implementations.

pub mod init;
pub mod scrape;
pub mod search;
pub mod status;
