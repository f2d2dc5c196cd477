//! Remote feed client
//!
//! Fetches the feed with a single `GET` and maps the JSON payload
//! (`{"items": [{"id", "description", "location", "image"}]}`) into
//! [`FeedRecord`](feed_core::FeedRecord)s.
//!
//! The transport sits behind [`HttpClient`] so the loader can be exercised
//! without a network; [`ReqwestHttpClient`] is the production implementation.

mod client;
mod error;
mod loader;
mod mapper;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient, TransportError};
pub use error::{RemoteFeedError, Result};
pub use loader::RemoteFeedLoader;
