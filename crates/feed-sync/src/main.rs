//! Feed sync - keeps the local feed cache current
//!
//! Validates the cache on startup, fetches the remote feed, caches it on
//! success and serves the cached copy when the remote is unavailable. The
//! resulting feed is printed to stdout as JSON.

mod config;
mod error;
mod sync;

use crate::config::{CacheBackend, Config};
use crate::error::Result;
use crate::sync::sync_feed;
use chrono::Utc;
use feed_api::{ReqwestHttpClient, RemoteFeedLoader};
use feed_cache::{FeedStore, FileFeedStore, LocalFeedLoader};
use feed_cache_db::SqliteFeedStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("feed_sync=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    let config = Config::from_env()?;
    info!("Feed URL: {}", config.feed_url);
    info!("Cache backend: {:?}", config.backend);

    let store = open_store(&config.backend).await?;
    let cache = LocalFeedLoader::new(store, Utc::now);
    cache.validate_cache().await;

    let client = ReqwestHttpClient::with_timeout(config.http_timeout);
    let remote = RemoteFeedLoader::new(config.feed_url.clone(), Arc::new(client));

    let outcome = sync_feed(&remote, &cache).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

async fn open_store(backend: &CacheBackend) -> Result<Arc<dyn FeedStore>> {
    match backend {
        CacheBackend::File(path) => {
            let store = FileFeedStore::new(path.clone());
            store.init().await?;
            Ok(Arc::new(store))
        }
        CacheBackend::Sqlite(database_url) => {
            let store = SqliteFeedStore::connect(database_url).await?;
            Ok(Arc::new(store))
        }
    }
}
