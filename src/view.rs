//! Presentation data handed to the dashboard's chart and map widgets

use geojson::Feature;
use serde::Serialize;

use crate::models::{AttractionRecord, Location, VisitorYear};
use crate::resolver::{Resolution, ResolveWarning};

/// Placeholder for fields the table leaves empty
pub const NOT_AVAILABLE: &str = "N/A";

/// Zoom level the map opens at
pub const DEFAULT_ZOOM: u8 = 12;

/// One bar of the visitor chart. `visitors` is `None` when the table has no
/// count for that year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorBar {
    pub year: VisitorYear,
    pub visitors: Option<u64>,
}

/// Visitor counts for the selected years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorSeries {
    pub title: String,
    pub bars: Vec<VisitorBar>,
}

impl VisitorSeries {
    /// Bars for `years` in selection order, repeated years dropped. An empty
    /// selection gives an empty chart.
    #[must_use]
    pub fn for_years(record: &AttractionRecord, years: &[VisitorYear]) -> Self {
        let mut bars: Vec<VisitorBar> = Vec::with_capacity(years.len());
        for &year in years {
            if bars.iter().any(|bar| bar.year == year) {
                continue;
            }
            bars.push(VisitorBar {
                year,
                visitors: record.visitors_in(year),
            });
        }

        Self {
            title: format!("No. of visitors of {} over the selected years", record.name),
            bars,
        }
    }

    /// Bars for all four years
    #[must_use]
    pub fn all_years(record: &AttractionRecord) -> Self {
        Self::for_years(record, &VisitorYear::ALL)
    }
}

/// A labelled fee with its currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeLine {
    pub label: &'static str,
    pub currency: &'static str,
    pub amount: String,
}

/// Popup content for the attraction marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupContent {
    pub title: String,
    pub description: String,
    pub nearby_hotels: String,
    pub fees: Vec<FeeLine>,
}

fn or_not_available(value: Option<&String>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), Clone::clone)
}

impl PopupContent {
    #[must_use]
    pub fn from_record(record: &AttractionRecord) -> Self {
        let fees = vec![
            FeeLine {
                label: "Entrance Fee (Citizens)",
                currency: "Ksh",
                amount: or_not_available(record.fees.citizens.as_ref()),
            },
            FeeLine {
                label: "Entrance Fee (Residents)",
                currency: "Ksh",
                amount: or_not_available(record.fees.residents.as_ref()),
            },
            FeeLine {
                label: "Entrance Fee (Non-Residents)",
                currency: "USD",
                amount: or_not_available(record.fees.non_residents.as_ref()),
            },
        ];

        Self {
            title: record.name.clone(),
            description: record.description.clone(),
            nearby_hotels: or_not_available(record.nearby_lodging.as_ref()),
            fees,
        }
    }
}

/// Everything the map widget needs for one attraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// No marker is drawn when this is absent
    pub center: Option<Location>,
    pub zoom: u8,
    pub tooltip: String,
    pub popup: PopupContent,
    pub boundary: Option<Feature>,
}

/// Full dashboard payload for a selected attraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttractionView {
    pub attraction: AttractionRecord,
    pub county: Option<String>,
    pub chart: VisitorSeries,
    pub map: MapView,
    pub warnings: Vec<String>,
}

impl AttractionView {
    /// Package a resolution for the selected `years`. `name_field` names the
    /// county property on the boundary feature.
    #[must_use]
    pub fn build(resolution: &Resolution<'_>, years: &[VisitorYear], name_field: &str) -> Self {
        let record = resolution.record;

        Self {
            attraction: record.clone(),
            county: resolution.county.clone(),
            chart: VisitorSeries::for_years(record, years),
            map: MapView {
                center: record.location,
                zoom: DEFAULT_ZOOM,
                tooltip: record.name.clone(),
                popup: PopupContent::from_record(record),
                boundary: resolution
                    .boundary
                    .as_ref()
                    .map(|boundary| boundary.to_feature(name_field)),
            },
            warnings: resolution
                .warnings
                .iter()
                .map(ResolveWarning::to_string)
                .collect(),
        }
    }
}
