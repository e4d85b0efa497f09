//! County boundary geometry

use geo::MultiPolygon;
use geojson::{Feature, Geometry, JsonObject, Value};

/// Display name of the boundary overlay layer
pub const BOUNDARY_LAYER_NAME: &str = "County Boundary";

/// A named county and its administrative boundary
#[derive(Debug, Clone, PartialEq)]
pub struct CountyBoundary {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

impl CountyBoundary {
    #[must_use]
    pub fn new(name: &str, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.to_string(),
            geometry,
        }
    }

    /// GeoJSON feature for the map overlay. `name_field` is the property the
    /// county name is published under.
    #[must_use]
    pub fn to_feature(&self, name_field: &str) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(name_field.to_string(), self.name.clone().into());
        properties.insert("layer".to_string(), BOUNDARY_LAYER_NAME.into());

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(&self.geometry))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
