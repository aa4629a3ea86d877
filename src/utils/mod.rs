//! Shared utilities.

mod slug;

pub use slug::{entity_slug, slugify};
