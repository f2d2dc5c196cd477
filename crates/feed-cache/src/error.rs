//! Error types for the feed cache

use std::fmt;

/// Failure of the storage medium behind a [`FeedStore`](crate::FeedStore)
///
/// Surfaced verbatim through `save` and `load`. There is no "stale" variant:
/// an expired snapshot is reported as an empty feed.
#[derive(Debug)]
pub enum StoreError {
    Io(Box<std::io::Error>),
    Serialization(serde_json::Error),
    /// Persisted data was readable but does not describe a valid snapshot
    Corrupted(String),
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap an error raised by an external storage engine
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "IO error: {}", err),
            StoreError::Serialization(err) => write!(f, "Serialization error: {}", err),
            StoreError::Corrupted(msg) => write!(f, "Corrupted cache: {}", msg),
            StoreError::Backend(err) => write!(f, "Storage backend error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err.as_ref()),
            StoreError::Serialization(err) => Some(err),
            StoreError::Backend(err) => Some(err.as_ref()),
            StoreError::Corrupted(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
