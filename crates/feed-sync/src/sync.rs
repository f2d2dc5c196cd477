//! Remote-first feed loading with cache fallback

use feed_cache::{FeedStore, LocalFeedLoader};
use feed_core::{FeedLoader, FeedRecord};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Remote,
    Cache,
}

#[derive(Debug, Serialize)]
pub struct SyncOutcome {
    pub source: FeedSource,
    pub feed: Vec<FeedRecord>,
}

/// Load the remote feed and cache it, or serve the cache when the remote fails
///
/// A failure to cache a freshly loaded feed is logged, not returned: the
/// caller still gets the remote records.
pub async fn sync_feed<R, S>(remote: &R, cache: &LocalFeedLoader<S>) -> Result<SyncOutcome>
where
    R: FeedLoader,
    S: FeedStore + ?Sized,
{
    match remote.load().await {
        Ok(feed) => {
            info!(count = feed.len(), "Loaded remote feed");
            if let Err(e) = cache.save(&feed).await {
                warn!(error = %e, "Failed to cache remote feed");
            }
            Ok(SyncOutcome {
                source: FeedSource::Remote,
                feed,
            })
        }
        Err(e) => {
            warn!(error = %e, "Remote feed unavailable, serving cached feed");
            let feed = cache.load().await?;
            info!(count = feed.len(), "Loaded cached feed");
            Ok(SyncOutcome {
                source: FeedSource::Cache,
                feed,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use feed_api::RemoteFeedError;
    use feed_cache::{CachedFeed, FileFeedStore};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use url::Url;
    use uuid::Uuid;

    struct RemoteStub(Option<Vec<FeedRecord>>);

    #[async_trait]
    impl FeedLoader for RemoteStub {
        type Error = RemoteFeedError;

        async fn load(&self) -> std::result::Result<Vec<FeedRecord>, RemoteFeedError> {
            self.0.clone().ok_or(RemoteFeedError::InvalidData)
        }
    }

    fn unique_feed() -> Vec<FeedRecord> {
        (0..2)
            .map(|n| {
                FeedRecord::new(
                    Uuid::new_v4(),
                    None,
                    None,
                    Url::parse(&format!("https://any-url.com/{n}")).unwrap(),
                )
            })
            .collect()
    }

    fn make_cache(
        now: DateTime<Utc>,
    ) -> (TempDir, Arc<FileFeedStore>, LocalFeedLoader<FileFeedStore>) {
        let dir = tempdir().unwrap();
        let store = Arc::new(FileFeedStore::new(dir.path().join("feed-store.json")));
        let cache = LocalFeedLoader::new(Arc::clone(&store), move || now);
        (dir, store, cache)
    }

    #[tokio::test]
    async fn test_remote_feed_is_returned_and_cached() {
        let now = Utc::now();
        let (_dir, store, cache) = make_cache(now);
        let feed = unique_feed();

        let outcome = sync_feed(&RemoteStub(Some(feed.clone())), &cache)
            .await
            .unwrap();

        assert_eq!(outcome.source, FeedSource::Remote);
        assert_eq!(outcome.feed, feed);
        assert_eq!(
            store.retrieve().await.unwrap(),
            CachedFeed::found(feed, now)
        );
    }

    #[tokio::test]
    async fn test_cached_feed_is_served_when_remote_fails() {
        let now = Utc::now();
        let (_dir, store, cache) = make_cache(now);
        let feed = unique_feed();
        store.insert(&feed, now - Duration::days(1)).await.unwrap();

        let outcome = sync_feed(&RemoteStub(None), &cache).await.unwrap();

        assert_eq!(outcome.source, FeedSource::Cache);
        assert_eq!(outcome.feed, feed);
    }

    #[tokio::test]
    async fn test_stale_cache_is_served_as_empty_when_remote_fails() {
        let now = Utc::now();
        let (_dir, store, cache) = make_cache(now);
        store
            .insert(&unique_feed(), now - Duration::days(8))
            .await
            .unwrap();

        let outcome = sync_feed(&RemoteStub(None), &cache).await.unwrap();

        assert_eq!(outcome.source, FeedSource::Cache);
        assert!(outcome.feed.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_cache_fails_when_remote_fails() {
        let (_dir, store, cache) = make_cache(Utc::now());
        std::fs::write(store.store_path(), "invalid data").unwrap();

        assert!(sync_feed(&RemoteStub(None), &cache).await.is_err());
    }

    #[tokio::test]
    async fn test_validate_then_sync_evicts_stale_cache() {
        let now = Utc::now();
        let (_dir, store, cache) = make_cache(now);
        store
            .insert(&unique_feed(), now - Duration::days(8))
            .await
            .unwrap();

        cache.validate_cache().await;

        assert_eq!(store.retrieve().await.unwrap(), CachedFeed::Empty);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = SyncOutcome {
            source: FeedSource::Cache,
            feed: Vec::new(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"source":"cache","feed":[]}"#);
    }
}
