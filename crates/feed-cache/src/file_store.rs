//! JSON file storage backend

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_core::FeedRecord;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::error::Result;
use crate::store::{CachedFeed, FeedStore};

/// On-disk document for one snapshot
#[derive(Debug, Serialize, Deserialize)]
struct StoredCache {
    feed: Vec<StoredFeedRecord>,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredFeedRecord {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    url: Url,
}

impl From<&FeedRecord> for StoredFeedRecord {
    fn from(record: &FeedRecord) -> Self {
        Self {
            id: record.id(),
            description: record.description().map(str::to_string),
            location: record.location().map(str::to_string),
            url: record.url().clone(),
        }
    }
}

impl From<StoredFeedRecord> for FeedRecord {
    fn from(stored: StoredFeedRecord) -> Self {
        FeedRecord::new(stored.id, stored.description, stored.location, stored.url)
    }
}

/// Feed store persisting the snapshot as a single JSON file
///
/// All three operations run behind one lock, so concurrent callers observe
/// them in acquisition order and never see a half-written file.
pub struct FileFeedStore {
    store_path: PathBuf,
    queue: Mutex<()>,
}

impl FileFeedStore {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            queue: Mutex::new(()),
        }
    }

    /// Ensure the directory holding the store file exists
    pub async fn init(&self) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        info!(store_path = ?self.store_path, "Feed store initialized");
        Ok(())
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.store_path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn delete_cached_feed(&self) -> Result<()> {
        let _queue = self.queue.lock().await;

        match fs::remove_file(&self.store_path).await {
            Ok(()) => {
                debug!(store_path = ?self.store_path, "Deleted feed cache file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, feed: &[FeedRecord], timestamp: DateTime<Utc>) -> Result<()> {
        let _queue = self.queue.lock().await;

        let cache = StoredCache {
            feed: feed.iter().map(StoredFeedRecord::from).collect(),
            timestamp,
        };
        let encoded = serde_json::to_vec(&cache)?;

        // Write beside the target and rename so readers never see a partial file
        let staging = self.staging_path();
        if let Err(e) = fs::write(&staging, &encoded).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&staging, &self.store_path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        debug!(
            store_path = ?self.store_path,
            count = feed.len(),
            size = encoded.len(),
            "Wrote feed cache file"
        );
        Ok(())
    }

    async fn retrieve(&self) -> Result<CachedFeed> {
        let _queue = self.queue.lock().await;

        let data = match fs::read(&self.store_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CachedFeed::Empty),
            Err(e) => return Err(e.into()),
        };

        let cache: StoredCache = serde_json::from_slice(&data)?;
        Ok(CachedFeed::found(
            cache.feed.into_iter().map(FeedRecord::from).collect(),
            cache.timestamp,
        ))
    }
}
