//! Transactional SQLite backend for the local feed cache
//!
//! [`SqliteFeedStore`] implements [`feed_cache::FeedStore`] on two tables:
//! one row for the snapshot timestamp and one ordered row per feed image.

pub mod migrate;
mod store;
pub mod types;

pub use store::SqliteFeedStore;
