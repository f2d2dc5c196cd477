//! Maps feed API responses to feed records

use feed_core::FeedRecord;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::{RemoteFeedError, Result};

const OK_200: u16 = 200;

#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

#[derive(Debug, Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteFeedItem> for FeedRecord {
    fn from(item: RemoteFeedItem) -> Self {
        FeedRecord::new(item.id, item.description, item.location, item.image)
    }
}

pub(crate) fn map(body: &[u8], status: u16) -> Result<Vec<FeedRecord>> {
    if status != OK_200 {
        debug!(status, "Feed API returned non-200 status");
        return Err(RemoteFeedError::InvalidData);
    }

    let root: Root = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Failed to decode feed payload");
        RemoteFeedError::InvalidData
    })?;

    Ok(root.items.into_iter().map(FeedRecord::from).collect())
}
