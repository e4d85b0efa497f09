//! Data models for the tourism data service

pub mod attraction;
pub mod boundary;
pub mod location;

pub use attraction::{AttractionRecord, EntranceFees, VisitorYear};
pub use boundary::CountyBoundary;
pub use location::Location;
