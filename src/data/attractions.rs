//! Attraction table parsing and schema validation

use std::collections::{BTreeMap, HashMap, HashSet};

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::models::attraction::{
    COLUMN_ATTRACTION, COLUMN_DESCRIPTION, COLUMN_FEE_CITIZENS, COLUMN_FEE_NON_RESIDENTS,
    COLUMN_FEE_RESIDENTS, COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NEARBY_LODGING,
    REQUIRED_COLUMNS,
};
use crate::models::{AttractionRecord, EntranceFees, Location, VisitorYear};
use crate::{Result, TourismError};

/// The loaded attraction table, rows in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttractionTable {
    columns: Vec<String>,
    records: Vec<AttractionRecord>,
}

impl AttractionTable {
    /// Build a table from already parsed records. The column list is the
    /// required set.
    #[must_use]
    pub fn new(records: Vec<AttractionRecord>) -> Self {
        Self {
            columns: REQUIRED_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            records,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    #[must_use]
    pub fn records(&self) -> &[AttractionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct attraction names in order of first appearance. These are the
    /// only valid selections.
    #[must_use]
    pub fn unique_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|record| record.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// First row whose name equals `name`. Later duplicates are ignored.
    #[must_use]
    pub fn find_first(&self, name: &str) -> Option<&AttractionRecord> {
        self.records.iter().find(|record| record.name == name)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode `bytes` with the encoding named by `label`. Malformed sequences are
/// replaced rather than rejected.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| TourismError::config(format!("Unknown text encoding '{label}'")))?;

    // a UTF-8 byte order mark is dropped but never overrides the declared encoding
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        warn!(
            "Replaced malformed {} sequences while decoding attraction data",
            encoding.name()
        );
    }
    Ok(text.into_owned())
}

/// Fail with every required column absent from `headers`
pub fn validate_columns<'a, I>(headers: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = headers.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(*column))
        .map(|column| (*column).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TourismError::Schema { missing })
    }
}

/// Parse raw CSV bytes into an attraction table
pub fn parse_attractions(bytes: &[u8], encoding_label: &str) -> Result<AttractionTable> {
    let text = decode_text(bytes, encoding_label)?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TourismError::parse(format!("Failed to read CSV header: {e}")))?
        .clone();
    validate_columns(headers.iter())?;

    let columns = ColumnIndex::new(&headers);
    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        // header is line 1
        let line = row + 2;
        let raw = result.map_err(|e| TourismError::parse(format!("Bad CSV row {line}: {e}")))?;

        match columns.record(&raw, line) {
            Some(record) => records.push(record),
            None => debug!("Skipping row {} without an attraction name", line),
        }
    }

    debug!("Parsed {} attraction rows", records.len());

    Ok(AttractionTable {
        columns: headers.iter().map(str::to_string).collect(),
        records,
    })
}

struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            // first occurrence of a duplicated header wins
            positions.entry(header.to_string()).or_insert(i);
        }
        Self { positions }
    }

    fn cell<'r>(&self, raw: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.positions
            .get(column)
            .and_then(|&i| raw.get(i))
            .map(str::trim)
    }

    fn text(&self, raw: &StringRecord, column: &str) -> Option<String> {
        self.cell(raw, column)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn coordinate(&self, raw: &StringRecord, column: &str) -> Option<f64> {
        self.cell(raw, column)
            .and_then(|value| value.parse::<f64>().ok())
    }

    /// Row coordinates, or `None` when either cell is blank, not a number or
    /// out of range. The row itself is kept.
    fn location(&self, raw: &StringRecord, name: &str, line: usize) -> Option<Location> {
        let location = match (
            self.coordinate(raw, COLUMN_LATITUDE),
            self.coordinate(raw, COLUMN_LONGITUDE),
        ) {
            (Some(latitude), Some(longitude)) => Location::new(latitude, longitude),
            _ => {
                warn!("Row {}: no usable coordinates for '{}'", line, name);
                return None;
            }
        };

        if location.is_valid() {
            Some(location)
        } else {
            warn!(
                "Row {}: coordinates ({}) for '{}' out of range",
                line,
                location.format_coordinates(),
                name
            );
            None
        }
    }

    fn record(&self, raw: &StringRecord, line: usize) -> Option<AttractionRecord> {
        let name = self.text(raw, COLUMN_ATTRACTION)?;
        let location = self.location(raw, &name, line);

        let visitors: BTreeMap<VisitorYear, u64> = VisitorYear::ALL
            .into_iter()
            .filter_map(|year| {
                self.cell(raw, year.column())
                    .and_then(parse_count)
                    .map(|count| (year, count))
            })
            .collect();

        Some(AttractionRecord {
            name,
            location,
            description: self.text(raw, COLUMN_DESCRIPTION).unwrap_or_default(),
            nearby_lodging: self.text(raw, COLUMN_NEARBY_LODGING),
            fees: EntranceFees {
                citizens: self.text(raw, COLUMN_FEE_CITIZENS),
                residents: self.text(raw, COLUMN_FEE_RESIDENTS),
                non_residents: self.text(raw, COLUMN_FEE_NON_RESIDENTS),
            },
            visitors,
        })
    }
}

/// Visitor counts may carry thousands separators or a trailing `.0`.
fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<u64>().ok().or_else(|| {
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "Attraction,Latitude,Longitude,Description,Nearby_Hotels_Lodges,\
Entrace_fee(citizens)Kshs,Residents,Non_Residents(USD),Visitor_Statistics(2020),\
Visitor_Statistics(2021),Visitor_Statistics(2022),Visitor_Statistics(2023)";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.into_bytes()
    }

    #[test]
    fn test_parse_full_row() {
        let bytes = csv(&[
            "Lake Nakuru National Park,-0.37,36.08,A national park,Sarova Lion Hill,860,1030,60,\"120,000\",150000,210000.0,250000",
        ]);

        let table = parse_attractions(&bytes, "ISO-8859-1").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.columns().len(), 12);
        assert!(table.has_column("Visitor_Statistics(2023)"));
        let record = &table.records()[0];
        assert_eq!(record.name, "Lake Nakuru National Park");
        assert_eq!(record.location, Some(Location::new(-0.37, 36.08)));
        assert_eq!(record.description, "A national park");
        assert_eq!(record.nearby_lodging.as_deref(), Some("Sarova Lion Hill"));
        assert_eq!(record.fees.citizens.as_deref(), Some("860"));
        assert_eq!(record.fees.residents.as_deref(), Some("1030"));
        assert_eq!(record.fees.non_residents.as_deref(), Some("60"));
        assert_eq!(record.visitors_in(VisitorYear::Y2020), Some(120_000));
        assert_eq!(record.visitors_in(VisitorYear::Y2022), Some(210_000));
        assert_eq!(record.visitors_in(VisitorYear::Y2023), Some(250_000));
    }

    #[test]
    fn test_optional_fields_absent_are_not_errors() {
        let bytes = b"Attraction,Latitude,Longitude,Description\nMenengai Crater,-0.2,36.07,A caldera\n";

        let table = parse_attractions(bytes, "ISO-8859-1").unwrap();

        let record = &table.records()[0];
        assert!(record.nearby_lodging.is_none());
        assert_eq!(record.fees, EntranceFees::default());
        assert!(record.visitors.is_empty());
    }

    #[rstest]
    #[case("Latitude")]
    #[case("Longitude")]
    #[case("Description")]
    #[case("Attraction")]
    fn test_missing_required_column_fails(#[case] dropped: &str) {
        let header: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != dropped)
            .collect();
        let text = format!("{}\n", header.join(","));

        let err = parse_attractions(text.as_bytes(), "ISO-8859-1").unwrap_err();

        match err {
            TourismError::Schema { missing } => assert_eq!(missing, vec![dropped.to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_columns_reports_all_missing() {
        let err = validate_columns(["Attraction", "Fee"]).unwrap_err();
        match err {
            TourismError::Schema { missing } => {
                assert_eq!(missing, vec!["Latitude", "Longitude", "Description"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_bytes_decode_permissively() {
        // "Hell’s" as UTF-8 bytes read through the legacy single-byte encoding
        let mut bytes = b"Attraction,Latitude,Longitude,Description\nHell".to_vec();
        bytes.extend_from_slice(&[0xE2, 0x80, 0x99]);
        bytes.extend_from_slice(b"s Gate National Park,-0.91,36.31,Gorge \xE9t\xE9\n");

        let table = parse_attractions(&bytes, "ISO-8859-1").unwrap();

        let record = &table.records()[0];
        assert_eq!(record.name, "Hellâ€™s Gate National Park");
        assert_eq!(record.description, "Gorge été");
    }

    #[rstest]
    #[case("")]
    #[case("north")]
    #[case("95.0")]
    fn test_bad_latitude_keeps_row_without_location(#[case] latitude: &str) {
        let text = format!(
            "Attraction,Latitude,Longitude,Description\n\
Lake Nakuru National Park,-0.37,36.08,A national park\n\
Kariandusi Prehistoric Site,{latitude},36.28,Stone age site\n"
        );

        let table = parse_attractions(text.as_bytes(), "ISO-8859-1").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].location, Some(Location::new(-0.37, 36.08)));
        let record = table.find_first("Kariandusi Prehistoric Site").unwrap();
        assert_eq!(record.location, None);
        assert_eq!(record.description, "Stone age site");
    }

    #[test]
    fn test_byte_order_mark_does_not_override_declared_encoding() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Attraction,Latitude,Longitude,Description\nHell");
        bytes.extend_from_slice(&[0xE2, 0x80, 0x99]);
        bytes.extend_from_slice(b"s Gate National Park,-0.91,36.31,A gorge\n");

        let table = parse_attractions(&bytes, "ISO-8859-1").unwrap();

        assert!(table.has_column("Attraction"));
        assert_eq!(table.records()[0].name, "Hellâ€™s Gate National Park");
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let bytes = b"Attraction,Latitude,Longitude,Description\n,0,0,blank\nLake Naivasha,-0.77,36.35,A lake\n";
        let table = parse_attractions(bytes, "ISO-8859-1").unwrap();
        assert_eq!(table.unique_names(), vec!["Lake Naivasha"]);
    }

    #[test]
    fn test_unique_names_keep_first_appearance_order() {
        let bytes = csv(&[
            "Menengai Crater,-0.2,36.07,A,,,,,,,,",
            "Lake Naivasha,-0.77,36.35,B,,,,,,,,",
            "Menengai Crater,-0.21,36.08,C,,,,,,,,",
        ]);
        let table = parse_attractions(&bytes, "ISO-8859-1").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.unique_names(), vec!["Menengai Crater", "Lake Naivasha"]);
        assert_eq!(table.find_first("Menengai Crater").unwrap().description, "A");
    }

    #[rstest]
    #[case("1200", Some(1200))]
    #[case("12,000", Some(12_000))]
    #[case("3500.0", Some(3500))]
    #[case("", None)]
    #[case("n/a", None)]
    #[case("-4", None)]
    #[case("12.5", None)]
    fn test_parse_count(#[case] raw: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_count(raw), expected);
    }

    #[test]
    fn test_unknown_encoding_label() {
        let err = decode_text(b"x", "not-an-encoding").unwrap_err();
        assert!(matches!(err, TourismError::Config { .. }));
    }
}
