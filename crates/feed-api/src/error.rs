//! Error types for the remote feed client

use std::fmt;

use crate::client::TransportError;

/// Errors that can occur while loading the remote feed
#[derive(Debug)]
pub enum RemoteFeedError {
    /// The request never produced a response
    Connectivity(TransportError),
    /// Non-200 response or a payload that is not a feed
    InvalidData,
}

impl fmt::Display for RemoteFeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connectivity(e) => write!(f, "Connectivity error: {}", e),
            Self::InvalidData => write!(f, "Invalid feed data"),
        }
    }
}

impl std::error::Error for RemoteFeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connectivity(e) => Some(e.as_ref()),
            Self::InvalidData => None,
        }
    }
}

/// Result type for remote feed operations
pub type Result<T> = std::result::Result<T, RemoteFeedError>;
