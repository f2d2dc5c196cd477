//! Cache store contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_core::FeedRecord;

use crate::error::Result;

/// The whole cache contents at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSnapshot {
    pub feed: Vec<FeedRecord>,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a successful retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedFeed {
    Empty,
    Found(CachedSnapshot),
}

impl CachedFeed {
    pub fn found(feed: Vec<FeedRecord>, timestamp: DateTime<Utc>) -> Self {
        CachedFeed::Found(CachedSnapshot { feed, timestamp })
    }
}

/// Single-slot persistent store for one feed snapshot
///
/// Implementations own the physical medium and must serialize access to it:
/// effects of concurrent calls are applied in a consistent total order.
///
/// - `delete` succeeds when nothing is stored.
/// - `insert` replaces any previous snapshot; it never appends or merges.
/// - `retrieve` has no side effects. It returns `Empty` when nothing is
///   stored and fails when the stored representation can't be decoded.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn delete_cached_feed(&self) -> Result<()>;

    async fn insert(&self, feed: &[FeedRecord], timestamp: DateTime<Utc>) -> Result<()>;

    async fn retrieve(&self) -> Result<CachedFeed>;
}
