use std::sync::Arc;

use async_trait::async_trait;
use feed_core::{FeedLoader, FeedRecord};
use tracing::warn;
use url::Url;

use crate::client::HttpClient;
use crate::error::{RemoteFeedError, Result};
use crate::mapper;

/// Loads the feed from a remote endpoint
pub struct RemoteFeedLoader<C: ?Sized> {
    url: Url,
    client: Arc<C>,
}

impl<C: HttpClient + ?Sized> RemoteFeedLoader<C> {
    pub fn new(url: Url, client: Arc<C>) -> Self {
        Self { url, client }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn load(&self) -> Result<Vec<FeedRecord>> {
        let response = self.client.get(&self.url).await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Feed request failed");
            RemoteFeedError::Connectivity(e)
        })?;

        mapper::map(&response.body, response.status)
    }
}

#[async_trait]
impl<C: HttpClient + ?Sized> FeedLoader for RemoteFeedLoader<C> {
    type Error = RemoteFeedError;

    async fn load(&self) -> Result<Vec<FeedRecord>> {
        RemoteFeedLoader::load(self).await
    }
}
