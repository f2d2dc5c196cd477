use chrono::{DateTime, Utc};
use feed_cache::StoreError;
use feed_core::FeedRecord;
use sqlx::FromRow;
use url::Url;
use uuid::Uuid;

/// Snapshot row from `feed_cache`
#[derive(Debug, Clone, FromRow)]
pub struct ManagedCacheRow {
    pub timestamp: DateTime<Utc>,
}

/// Image row from `feed_images`, selected in position order
#[derive(Debug, Clone, FromRow)]
pub struct ManagedFeedImageRow {
    pub id: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: String,
}

impl TryFrom<ManagedFeedImageRow> for FeedRecord {
    type Error = StoreError;

    fn try_from(row: ManagedFeedImageRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| StoreError::Corrupted(format!("invalid image id {}: {}", row.id, e)))?;
        let url = Url::parse(&row.url)
            .map_err(|e| StoreError::Corrupted(format!("invalid image url {}: {}", row.url, e)))?;
        Ok(FeedRecord::new(id, row.description, row.location, url))
    }
}
