//! Behavioural tests for loading the source tables

mod support;

use std::sync::Arc;

use nakuru_tourism::data::test_support::StubFetcher;
use nakuru_tourism::{DataLoader, TourismError, load_sources};
use rstest::rstest;
use support::{COUNTIES, CSV_URL, GEO_URL, sources_config, stub_fetcher};

#[tokio::test]
async fn loads_both_tables() {
    let fetcher = stub_fetcher();

    let sources = load_sources(fetcher.as_ref(), &sources_config()).await.unwrap();

    assert_eq!(sources.attractions.len(), 5);
    assert_eq!(
        sources.attractions.unique_names(),
        vec![
            "Lake Nakuru National Park",
            "Menengai Crater",
            "Hellâ€™s Gate National Park",
            "Kariandusi Prehistoric Site",
        ]
    );
    assert_eq!(sources.boundaries.county_names(), vec!["Nakuru", "Baringo"]);
}

#[tokio::test]
async fn memoized_loader_fetches_each_source_once() {
    let fetcher = stub_fetcher();
    let loader = DataLoader::new(fetcher.clone(), sources_config());

    for _ in 0..3 {
        loader.get().await.unwrap();
    }

    assert_eq!(fetcher.calls(), 2);
}

#[rstest]
#[case("Attraction,Longitude,Description\nX,1,Y\n", vec!["Latitude"])]
#[case("Attraction,Latitude,Longitude\nX,1,2\n", vec!["Description"])]
#[case("Name,Lat,Lon,Desc\nX,1,2,Y\n", vec!["Attraction", "Latitude", "Longitude", "Description"])]
#[tokio::test]
async fn missing_columns_halt_the_load(#[case] csv: &str, #[case] expected: Vec<&str>) {
    let fetcher = StubFetcher::new()
        .with_body(CSV_URL, csv)
        .with_body(GEO_URL, COUNTIES);

    let err = load_sources(&fetcher, &sources_config()).await.unwrap_err();

    match err {
        TourismError::Schema { missing } => assert_eq!(missing, expected),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_boundaries_fail_the_whole_load() {
    let fetcher = Arc::new(StubFetcher::new().with_body(CSV_URL, support::attractions_csv()));
    let loader = DataLoader::new(fetcher, sources_config());

    let err = loader.get().await.unwrap_err();

    assert!(err.is_load_failure());
    assert!(err.user_message().starts_with("Data loading failed"));
    assert!(!loader.is_loaded());
}

#[tokio::test]
async fn malformed_boundaries_are_a_parse_failure() {
    let fetcher = StubFetcher::new()
        .with_body(CSV_URL, support::attractions_csv())
        .with_body(GEO_URL, "<html>not geojson</html>");

    let err = load_sources(&fetcher, &sources_config()).await.unwrap_err();

    assert!(matches!(err, TourismError::Parse { .. }));
}

#[tokio::test]
async fn row_with_blank_coordinates_still_loads() {
    let csv = "Attraction,Latitude,Longitude,Description\n\
Lake Nakuru National Park,-0.37,36.08,A national park\n\
Kariandusi Prehistoric Site,,36.28,Stone age site\n";
    let fetcher = StubFetcher::new()
        .with_body(CSV_URL, csv)
        .with_body(GEO_URL, COUNTIES);

    let sources = load_sources(&fetcher, &sources_config()).await.unwrap();

    assert_eq!(sources.attractions.len(), 2);
    let record = sources
        .attractions
        .find_first("Kariandusi Prehistoric Site")
        .unwrap();
    assert!(record.location.is_none());
}

#[tokio::test]
async fn byte_order_mark_keeps_declared_encoding() {
    let mut csv = b"\xEF\xBB\xBF".to_vec();
    csv.extend_from_slice(&support::attractions_csv());
    let fetcher = StubFetcher::new()
        .with_body(CSV_URL, csv)
        .with_body(GEO_URL, COUNTIES);

    let sources = load_sources(&fetcher, &sources_config()).await.unwrap();

    assert!(
        sources
            .attractions
            .find_first("Hellâ€™s Gate National Park")
            .is_some()
    );
}
