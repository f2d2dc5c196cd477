//! Save, load and validate workflows over a [`FeedStore`]

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_core::{FeedLoader, FeedRecord};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::policy::FeedCachePolicy;
use crate::store::{CachedFeed, FeedStore};

type CurrentDate = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Cache-backed feed loader
///
/// Holds no data of its own, only a shared handle to the store and a clock.
/// The `async fn` forms borrow the loader for the duration of the call. The
/// `spawn_*` forms run on a tokio task that does not keep the loader alive:
/// once the loader is dropped, a pending detached operation issues no further
/// store calls and its completion is never invoked.
/// A store call already in flight when the loader is dropped is abandoned
/// with it and may not take effect.
pub struct LocalFeedLoader<S: ?Sized> {
    operations: CacheOperations<S>,
    // Receivers observe closure when the loader is dropped.
    alive: watch::Sender<()>,
}

impl<S: FeedStore + ?Sized> LocalFeedLoader<S> {
    pub fn new<F>(store: Arc<S>, current_date: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        let (alive, _) = watch::channel(());
        Self {
            operations: CacheOperations {
                store,
                current_date: Arc::new(current_date),
            },
            alive,
        }
    }

    /// Replace the cached feed: delete, then insert stamped with the current date
    pub async fn save(&self, feed: &[FeedRecord]) -> Result<()> {
        self.operations.save(feed).await
    }

    /// Cached feed if present and not stale, otherwise an empty list
    pub async fn load(&self) -> Result<Vec<FeedRecord>> {
        self.operations.load().await
    }

    /// Delete the cache when it is stale or unreadable
    pub async fn validate_cache(&self) {
        self.operations.validate_cache().await
    }
}

impl<S: FeedStore + ?Sized + 'static> LocalFeedLoader<S> {
    pub fn spawn_save<C>(&self, feed: Vec<FeedRecord>, completion: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<()>) + Send + 'static,
    {
        let operations = self.operations.clone();
        self.spawn_guarded(async move { operations.save(&feed).await }, completion)
    }

    pub fn spawn_load<C>(&self, completion: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<Vec<FeedRecord>>) + Send + 'static,
    {
        let operations = self.operations.clone();
        self.spawn_guarded(async move { operations.load().await }, completion)
    }

    /// Fire-and-forget cache validation
    pub fn spawn_validate_cache(&self) -> JoinHandle<()> {
        let operations = self.operations.clone();
        self.spawn_guarded(async move { operations.validate_cache().await }, |()| {})
    }

    fn spawn_guarded<T, F, C>(&self, operation: F, completion: C) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let mut released = self.alive.subscribe();
        let guard = released.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = released.changed() => {
                    debug!("Feed loader dropped, abandoning pending cache operation");
                }
                output = operation => {
                    if guard.has_changed().is_err() {
                        debug!("Feed loader dropped, discarding cache completion");
                        return;
                    }
                    completion(output);
                }
            }
        })
    }
}

#[async_trait]
impl<S: FeedStore + ?Sized> FeedLoader for LocalFeedLoader<S> {
    type Error = StoreError;

    async fn load(&self) -> Result<Vec<FeedRecord>> {
        self.operations.load().await
    }
}

struct CacheOperations<S: ?Sized> {
    store: Arc<S>,
    current_date: CurrentDate,
}

impl<S: ?Sized> Clone for CacheOperations<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            current_date: Arc::clone(&self.current_date),
        }
    }
}

impl<S: FeedStore + ?Sized> CacheOperations<S> {
    async fn save(&self, feed: &[FeedRecord]) -> Result<()> {
        self.store.delete_cached_feed().await?;
        self.store.insert(feed, (self.current_date)()).await?;
        debug!(count = feed.len(), "Cached feed");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<FeedRecord>> {
        match self.store.retrieve().await? {
            CachedFeed::Found(snapshot)
                if FeedCachePolicy::validate(snapshot.timestamp, (self.current_date)()) =>
            {
                Ok(snapshot.feed)
            }
            CachedFeed::Found(snapshot) => {
                debug!(timestamp = %snapshot.timestamp, "Cached feed is stale");
                Ok(Vec::new())
            }
            CachedFeed::Empty => Ok(Vec::new()),
        }
    }

    async fn validate_cache(&self) {
        let should_delete = match self.store.retrieve().await {
            Err(e) => {
                debug!(error = %e, "Cached feed is unreadable");
                true
            }
            Ok(CachedFeed::Found(snapshot)) => {
                !FeedCachePolicy::validate(snapshot.timestamp, (self.current_date)())
            }
            Ok(CachedFeed::Empty) => false,
        };

        if should_delete {
            match self.store.delete_cached_feed().await {
                Ok(()) => debug!("Deleted invalid feed cache"),
                Err(e) => debug!(error = %e, "Failed to delete invalid feed cache"),
            }
        }
    }
}
