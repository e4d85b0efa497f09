//! Nakuru County tourism data service
//!
//! Loads the attraction table and county boundaries behind the tourism
//! dashboard, resolves a selected attraction to its record and boundary, and
//! serves the result to the chart and map widgets.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod view;
pub mod web;

// Re-export core types for public API
pub use crate::config::TourismConfig;
pub use data::{AttractionTable, BoundaryTable, DataLoader, Sources, load_sources};
pub use error::TourismError;
pub use models::{AttractionRecord, CountyBoundary, Location, VisitorYear};
pub use resolver::{CountyMap, Resolution, ResolveWarning, resolve};
pub use view::{AttractionView, PopupContent, VisitorSeries};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourismError>;
