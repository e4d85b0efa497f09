//! In-memory `SourceFetcher` for tests and offline runs

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::SourceFetcher;
use crate::{Result, TourismError};

/// Serves fixed bodies keyed by URL and counts every fetch
#[derive(Debug, Default)]
pub struct StubFetcher {
    bodies: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl StubFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body returned for `url`
    #[must_use]
    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    /// Number of fetches served or refused so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| TourismError::network(format!("Fetching {url} returned HTTP 404 Not Found")))
    }
}
