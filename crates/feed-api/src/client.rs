//! HTTP transport seam

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Error raised by the transport before any response is received
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Status and body of a completed HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// [`HttpClient`] backed by reqwest
pub struct ReqwestHttpClient {
    http: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new client with default settings (30 second timeout)
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(url = %url, status, size = body.len(), "Fetched feed");
        Ok(HttpResponse { status, body })
    }
}
