//! Loading and memoizing the source tables

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::{info, instrument};

use super::{AttractionTable, BoundaryTable, HttpFetcher, SourceFetcher};
use super::{parse_attractions, parse_boundaries};
use crate::Result;
use crate::config::{SourcesConfig, TourismConfig};

/// Both source tables, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub attractions: AttractionTable,
    pub boundaries: BoundaryTable,
}

/// Fetch, decode, validate and parse both sources. Any failure aborts the
/// whole load; there is no partial result.
#[instrument(skip_all, fields(attractions = %config.attractions_url, boundaries = %config.boundaries_url))]
pub async fn load_sources(fetcher: &dyn SourceFetcher, config: &SourcesConfig) -> Result<Sources> {
    let start_time = Instant::now();

    let csv_bytes = fetcher.fetch(&config.attractions_url).await?;
    let attractions = parse_attractions(&csv_bytes, &config.csv_encoding)?;

    let geo_bytes = fetcher.fetch(&config.boundaries_url).await?;
    let boundaries = parse_boundaries(&geo_bytes, &config.boundary_name_field)?;

    info!(
        "Loaded {} attractions and {} county boundaries in {:.3}s",
        attractions.len(),
        boundaries.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(Sources {
        attractions,
        boundaries,
    })
}

/// Loads the sources on first use and hands out the same tables afterwards.
///
/// A failed load is not remembered: the next call tries again.
pub struct DataLoader {
    fetcher: Arc<dyn SourceFetcher>,
    config: SourcesConfig,
    sources: OnceCell<Arc<Sources>>,
}

impl DataLoader {
    #[must_use]
    pub fn new(fetcher: Arc<dyn SourceFetcher>, config: SourcesConfig) -> Self {
        Self {
            fetcher,
            config,
            sources: OnceCell::new(),
        }
    }

    /// Loader backed by an HTTP fetcher
    pub fn from_config(config: &TourismConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::new(Arc::new(fetcher), config.sources.clone()))
    }

    /// The memoized tables, loading them if this is the first call
    pub async fn get(&self) -> Result<Arc<Sources>> {
        self.sources
            .get_or_try_init(|| async {
                load_sources(self.fetcher.as_ref(), &self.config)
                    .await
                    .map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.sources.initialized()
    }
}
