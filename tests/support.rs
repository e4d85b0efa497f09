//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use nakuru_tourism::config::SourcesConfig;
use nakuru_tourism::data::test_support::StubFetcher;

pub const CSV_URL: &str = "https://data.example.test/nakuru_tourist_attractions.csv";
pub const GEO_URL: &str = "https://data.example.test/KENYAcounties.geojson";

pub const HEADER: &str = "Attraction,Latitude,Longitude,Description,Nearby_Hotels_Lodges,\
Entrace_fee(citizens)Kshs,Residents,Non_Residents(USD),Visitor_Statistics(2020),\
Visitor_Statistics(2021),Visitor_Statistics(2022),Visitor_Statistics(2023)";

pub const COUNTIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"NAME_1": "Nakuru"},
            "geometry": {"type": "Polygon", "coordinates": [[[35.8,-1.2],[36.6,-1.2],[36.6,0.2],[35.8,0.2],[35.8,-1.2]]]}
        },
        {
            "type": "Feature",
            "properties": {"NAME_1": "Baringo"},
            "geometry": {"type": "Polygon", "coordinates": [[[35.6,0.2],[36.3,0.2],[36.3,1.6],[35.6,1.6],[35.6,0.2]]]}
        }
    ]
}"#;

/// Attraction CSV as the legacy-encoded upstream file would deliver it
pub fn attractions_csv() -> Vec<u8> {
    let mut bytes = HEADER.as_bytes().to_vec();
    bytes.extend_from_slice(
        b"\nLake Nakuru National Park,-0.37,36.08,A national park,Sarova Lion Hill,860,1030,60,120000,150000,210000,250000",
    );
    bytes.extend_from_slice(b"\nMenengai Crater,-0.2,36.07,A caldera,,300,,,5000,6000,7000,8000");
    bytes.extend_from_slice(b"\nHell");
    bytes.extend_from_slice(&[0xE2, 0x80, 0x99]);
    bytes.extend_from_slice(b"s Gate National Park,-0.91,36.31,A gorge,,,,,1,2,3,4");
    bytes.extend_from_slice(b"\nKariandusi Prehistoric Site,-0.45,36.28,Stone age site,,,,,,,,");
    bytes.extend_from_slice(b"\nMenengai Crater,-0.25,36.1,Duplicate row,,,,,,,,\n");
    bytes
}

pub fn sources_config() -> SourcesConfig {
    SourcesConfig {
        attractions_url: CSV_URL.to_string(),
        boundaries_url: GEO_URL.to_string(),
        ..SourcesConfig::default()
    }
}

pub fn stub_fetcher() -> Arc<StubFetcher> {
    Arc::new(
        StubFetcher::new()
            .with_body(CSV_URL, attractions_csv())
            .with_body(GEO_URL, COUNTIES),
    )
}
