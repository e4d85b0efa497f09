//! Retrieval of the raw source files

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::HttpConfig;
use crate::{Result, TourismError};

/// Fetches the raw bytes behind a source URL
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// `SourceFetcher` over HTTP(S)
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher from the HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TourismError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TourismError::network(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TourismError::network(format!(
                "Fetching {url} returned HTTP {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TourismError::network(format!("Reading body of {url} failed: {e}")))?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
