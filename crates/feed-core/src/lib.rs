//! Feed model shared across the feed crates
//!
//! Defines [`FeedRecord`], the unit stored by the local cache and produced by
//! the remote loader, and the [`FeedLoader`] trait both loaders implement.

mod loader;
mod record;

pub use loader::FeedLoader;
pub use record::FeedRecord;
