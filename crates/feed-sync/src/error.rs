//! Error types for feed-sync

use std::fmt;

use feed_cache::StoreError;

#[derive(Debug)]
pub enum SyncError {
    Config(String),
    Store(StoreError),
    Database(Box<sqlx::Error>),
    Output(serde_json::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SyncError::Store(err) => write!(f, "Feed cache error: {}", err),
            SyncError::Database(err) => write!(f, "Database error: {}", err),
            SyncError::Output(err) => write!(f, "Output error: {}", err),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Store(err) => Some(err),
            SyncError::Database(err) => Some(err.as_ref()),
            SyncError::Output(err) => Some(err),
            SyncError::Config(_) => None,
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::Store(err)
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(err: sqlx::Error) -> Self {
        SyncError::Database(Box::new(err))
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Output(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for SyncError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        SyncError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
