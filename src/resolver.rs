//! Attraction Resolver
//!
//! Joins a selected attraction to its row in the attraction table and, via
//! the fixed attraction-to-county map, to its county boundary.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::data::{AttractionTable, BoundaryTable};
use crate::models::{AttractionRecord, CountyBoundary};

/// Attractions with a known county. Keys are spelled the way the names
/// decode from the legacy-encoded attraction table.
const ATTRACTION_COUNTIES: [(&str, &str); 4] = [
    ("Lake Nakuru National Park", "Nakuru"),
    ("Menengai Crater", "Nakuru"),
    ("Lake Naivasha", "Nakuru"),
    ("Hellâ€™s Gate National Park", "Nakuru"),
];

/// Immutable attraction -> county lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyMap {
    counties: HashMap<String, String>,
}

impl CountyMap {
    /// The built-in mapping
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(ATTRACTION_COUNTIES)
    }

    #[must_use]
    pub fn from_pairs<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        Self {
            counties: pairs
                .into_iter()
                .map(|(attraction, county)| (attraction.into(), county.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn county_for(&self, attraction: &str) -> Option<&str> {
        self.counties.get(attraction).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }
}

impl Default for CountyMap {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Non-fatal problems met while resolving
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// The attraction maps to a county the boundary table does not contain
    BoundaryNotFound { county: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundaryNotFound { county } => {
                write!(f, "No boundary data found for {county}")
            }
        }
    }
}

/// A selected attraction and whatever boundary could be joined to it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub record: &'a AttractionRecord,
    pub county: Option<String>,
    pub boundary: Option<CountyBoundary>,
    pub warnings: Vec<ResolveWarning>,
}

/// Boundary lookup for a single attraction name.
///
/// Unmapped attractions yield nothing and no warning. A mapped county that is
/// missing from `boundaries` yields nothing plus one warning.
pub fn boundary_for(
    attraction: &str,
    boundaries: &BoundaryTable,
    county_map: &CountyMap,
) -> (Option<CountyBoundary>, Option<ResolveWarning>) {
    let Some(county) = county_map.county_for(attraction) else {
        debug!("No county mapped for {}", attraction);
        return (None, None);
    };

    match boundaries.find_county(county) {
        Some(boundary) => (Some(boundary), None),
        None => {
            let warning = ResolveWarning::BoundaryNotFound {
                county: county.to_string(),
            };
            warn!("{}", warning);
            (None, Some(warning))
        }
    }
}

/// Resolve `name` against the loaded tables.
///
/// Returns `None` only when no row carries `name`. With duplicate names the
/// first row in table order wins.
#[instrument(skip(attractions, boundaries, county_map))]
pub fn resolve<'a>(
    name: &str,
    attractions: &'a AttractionTable,
    boundaries: &BoundaryTable,
    county_map: &CountyMap,
) -> Option<Resolution<'a>> {
    let Some(record) = attractions.find_first(name) else {
        debug!("Attraction not present in table");
        return None;
    };

    let (boundary, warning) = boundary_for(&record.name, boundaries, county_map);

    Some(Resolution {
        record,
        county: county_map.county_for(&record.name).map(str::to_string),
        boundary,
        warnings: warning.into_iter().collect(),
    })
}
