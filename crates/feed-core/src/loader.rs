use async_trait::async_trait;

use crate::FeedRecord;

/// Anything that can produce the current feed
#[async_trait]
pub trait FeedLoader: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn load(&self) -> Result<Vec<FeedRecord>, Self::Error>;
}
