//! Attraction records as read from the attraction table

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Location;
use crate::TourismError;

/// Column holding the attraction name
pub const COLUMN_ATTRACTION: &str = "Attraction";
/// Column holding the latitude
pub const COLUMN_LATITUDE: &str = "Latitude";
/// Column holding the longitude
pub const COLUMN_LONGITUDE: &str = "Longitude";
/// Column holding the description
pub const COLUMN_DESCRIPTION: &str = "Description";
pub const COLUMN_NEARBY_LODGING: &str = "Nearby_Hotels_Lodges";
// Spelling follows the upstream CSV header.
pub const COLUMN_FEE_CITIZENS: &str = "Entrace_fee(citizens)Kshs";
pub const COLUMN_FEE_RESIDENTS: &str = "Residents";
pub const COLUMN_FEE_NON_RESIDENTS: &str = "Non_Residents(USD)";

/// Columns the table must carry for the load to succeed
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_ATTRACTION,
    COLUMN_LATITUDE,
    COLUMN_LONGITUDE,
    COLUMN_DESCRIPTION,
];

/// One of the fixed visitor statistic years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisitorYear {
    #[serde(rename = "2020")]
    Y2020,
    #[serde(rename = "2021")]
    Y2021,
    #[serde(rename = "2022")]
    Y2022,
    #[serde(rename = "2023")]
    Y2023,
}

impl VisitorYear {
    /// All years in chronological order
    pub const ALL: [Self; 4] = [Self::Y2020, Self::Y2021, Self::Y2022, Self::Y2023];

    #[must_use]
    pub fn year(self) -> u16 {
        match self {
            Self::Y2020 => 2020,
            Self::Y2021 => 2021,
            Self::Y2022 => 2022,
            Self::Y2023 => 2023,
        }
    }

    /// CSV column carrying this year's visitor count
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Y2020 => "Visitor_Statistics(2020)",
            Self::Y2021 => "Visitor_Statistics(2021)",
            Self::Y2022 => "Visitor_Statistics(2022)",
            Self::Y2023 => "Visitor_Statistics(2023)",
        }
    }
}

impl fmt::Display for VisitorYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

impl FromStr for VisitorYear {
    type Err = TourismError;

    /// Accepts either the bare year or the column label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|year| trimmed == year.column() || trimmed == year.year().to_string())
            .ok_or_else(|| {
                TourismError::validation(format!(
                    "Unknown visitor year '{trimmed}'. Expected one of 2020, 2021, 2022, 2023"
                ))
            })
    }
}

/// Entrance fee tiers; values are kept as published
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntranceFees {
    /// Kenyan citizens, Ksh
    pub citizens: Option<String>,
    /// Residents, Ksh
    pub residents: Option<String>,
    /// Non-residents, USD
    pub non_residents: Option<String>,
}

/// A single row of the attraction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionRecord {
    pub name: String,
    /// Absent when the row's coordinates were blank or unusable
    pub location: Option<Location>,
    pub description: String,
    pub nearby_lodging: Option<String>,
    pub fees: EntranceFees,
    /// Years without a usable count are absent
    pub visitors: BTreeMap<VisitorYear, u64>,
}

impl AttractionRecord {
    /// Create a record with only the required fields set
    #[must_use]
    pub fn new(name: &str, location: Location, description: &str) -> Self {
        Self {
            name: name.to_string(),
            location: Some(location),
            description: description.to_string(),
            nearby_lodging: None,
            fees: EntranceFees::default(),
            visitors: BTreeMap::new(),
        }
    }

    /// Visitor count for a year, if the table had one
    #[must_use]
    pub fn visitors_in(&self, year: VisitorYear) -> Option<u64> {
        self.visitors.get(&year).copied()
    }
}
