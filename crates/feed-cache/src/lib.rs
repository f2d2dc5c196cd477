//! Local feed cache
//!
//! Keeps the most recent successfully fetched feed so it can be served while
//! offline. A snapshot (records plus the time they were cached) lives in a
//! [`FeedStore`]; [`LocalFeedLoader`] saves, loads and validates it, treating
//! snapshots older than seven calendar days as absent.

mod error;
mod file_store;
mod loader;
mod policy;
mod store;
#[cfg(test)]
mod test_support;

pub use error::{Result, StoreError};
pub use file_store::FileFeedStore;
pub use loader::LocalFeedLoader;
pub use policy::{FeedCachePolicy, MAX_CACHE_AGE_DAYS};
pub use store::{CachedFeed, CachedSnapshot, FeedStore};
