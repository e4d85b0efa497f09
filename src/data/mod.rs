//! Data Loader
//!
//! Retrieves the attraction table (CSV) and the county boundary table
//! (GeoJSON), validates the attraction schema and memoizes the result for
//! the lifetime of the process.

pub mod attractions;
pub mod boundaries;
pub mod fetch;
pub mod loader;
pub mod test_support;

pub use attractions::{AttractionTable, decode_text, parse_attractions, validate_columns};
pub use boundaries::{BoundaryTable, parse_boundaries};
pub use fetch::{HttpFetcher, SourceFetcher};
pub use loader::{DataLoader, Sources, load_sources};
