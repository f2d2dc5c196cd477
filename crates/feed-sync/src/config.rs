use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Result, SyncError};

/// Where the local cache is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    File(PathBuf),
    Sqlite(String),
}

/// Configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: Url,
    pub backend: CacheBackend,
    pub http_timeout: Duration,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let feed_url = lookup("FEED_URL")
            .ok_or_else(|| SyncError::Config("FEED_URL environment variable is required".to_string()))?;
        let feed_url = Url::parse(&feed_url)
            .map_err(|e| SyncError::Config(format!("Invalid FEED_URL {}: {}", feed_url, e)))?;

        let backend = match lookup("CACHE_BACKEND").as_deref().unwrap_or("file") {
            "file" => CacheBackend::File(
                lookup("CACHE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./cache/feed-store.json")),
            ),
            "sqlite" => CacheBackend::Sqlite(
                lookup("DATABASE_URL")
                    .unwrap_or_else(|| "sqlite://./cache/feed-store.db".to_string()),
            ),
            other => {
                return Err(SyncError::Config(format!(
                    "Unsupported CACHE_BACKEND {} (expected file or sqlite)",
                    other
                )))
            }
        };

        let http_timeout = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            feed_url,
            backend,
            http_timeout,
        })
    }
}
