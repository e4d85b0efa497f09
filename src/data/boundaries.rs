//! County boundary table parsing

use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use tracing::debug;

use crate::models::CountyBoundary;
use crate::{Result, TourismError};

/// Named county polygons, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryTable {
    name_field: String,
    boundaries: Vec<CountyBoundary>,
}

impl BoundaryTable {
    #[must_use]
    pub fn new(name_field: &str, boundaries: Vec<CountyBoundary>) -> Self {
        Self {
            name_field: name_field.to_string(),
            boundaries,
        }
    }

    /// Property the county names were read from
    #[must_use]
    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    #[must_use]
    pub fn boundaries(&self) -> &[CountyBoundary] {
        &self.boundaries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Distinct county names, in source order
    #[must_use]
    pub fn county_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for boundary in &self.boundaries {
            if !names.contains(&boundary.name.as_str()) {
                names.push(&boundary.name);
            }
        }
        names
    }

    /// Every row named `county`, merged into one boundary
    #[must_use]
    pub fn find_county(&self, county: &str) -> Option<CountyBoundary> {
        let polygons: Vec<_> = self
            .boundaries
            .iter()
            .filter(|boundary| boundary.name == county)
            .flat_map(|boundary| boundary.geometry.0.iter().cloned())
            .collect();

        if polygons.is_empty() {
            None
        } else {
            Some(CountyBoundary::new(county, MultiPolygon::new(polygons)))
        }
    }
}

/// Parse a GeoJSON feature collection into a boundary table. Features lacking
/// a name or a polygonal geometry are skipped.
pub fn parse_boundaries(bytes: &[u8], name_field: &str) -> Result<BoundaryTable> {
    let geojson = GeoJson::from_reader(bytes)
        .map_err(|e| TourismError::parse(format!("Failed to parse GeoJSON: {e}")))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => return Err(TourismError::parse("GeoJSON must be a FeatureCollection")),
    };

    let mut boundaries = Vec::new();

    for (i, feature) in collection.features.into_iter().enumerate() {
        let name = match feature.property(name_field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => {
                debug!("Skipping feature {} without a '{}' property", i, name_field);
                continue;
            }
        };

        let Some(geometry) = feature.geometry else {
            debug!("Skipping feature {} ({}) without geometry", i, name);
            continue;
        };

        let shape: Geometry<f64> = geometry.value.try_into().map_err(|e| {
            TourismError::parse(format!("Invalid geometry for feature '{name}': {e}"))
        })?;

        let polygons = match shape {
            Geometry::MultiPolygon(mp) => mp,
            Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            _ => {
                debug!("Skipping non-polygonal feature {} ({})", i, name);
                continue;
            }
        };

        boundaries.push(CountyBoundary::new(&name, polygons));
    }

    debug!("Parsed {} county boundaries", boundaries.len());
    Ok(BoundaryTable::new(name_field, boundaries))
}
