//! Data-source contracts
//!
//! The spreadsheet gateway is an external collaborator. This module decodes
//! what it serves (plain JSON arrays or raw sheet `values` grids) and swaps in
//! the static fallback when it fails, so the result and standings code never
//! sees a data-source error.

pub mod fallback;
pub mod revalidate;
pub mod sheet;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::results::EventRow;
use crate::standings::{House, ScoreField};

pub use revalidate::{RevalidateError, RevalidateRequest, Revalidated, revalidate};
pub use sheet::SheetValues;

/// Advisory shown when house data falls back to the static list
pub const HOUSES_ADVISORY: &str = "Failed to load house data. Using fallback data.";

/// Why a data-source read produced nothing usable
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("timed out after {0} ms")]
    Timeout(u64),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("data source returned no rows")]
    Empty,
}

/// The two competitions with their own results sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Competition {
    Layatharang,
    Chakravyuh,
}

impl Competition {
    pub const ALL: [Competition; 2] = [Competition::Layatharang, Competition::Chakravyuh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::Layatharang => "Layatharang",
            Competition::Chakravyuh => "Chakravyuh",
        }
    }

    /// API route serving this competition's rows
    pub fn api_path(&self) -> &'static str {
        match self {
            Competition::Layatharang => "/api/layatharang",
            Competition::Chakravyuh => "/api/chakravyuh",
        }
    }

    /// Standings column that totals this competition
    pub fn score_field(&self) -> ScoreField {
        match self {
            Competition::Layatharang => ScoreField::Layatharang,
            Competition::Chakravyuh => ScoreField::Chakravyuh,
        }
    }
}

/// API route serving the house list
pub const HOUSES_API_PATH: &str = "/api/houses";

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Records(Vec<T>),
    Sheet(SheetValues),
}

fn decode<T, F>(json: &str, from_sheet: F) -> Result<Vec<T>, SourceError>
where
    T: DeserializeOwned,
    F: FnOnce(&SheetValues) -> Vec<T>,
{
    let items = match serde_json::from_str::<Payload<T>>(json)? {
        Payload::Records(items) => items,
        Payload::Sheet(sheet) => from_sheet(&sheet),
    };
    if items.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(items)
}

/// Decode a house payload (JSON array of houses or a sheet `values` grid)
pub fn decode_houses(json: &str) -> Result<Vec<House>, SourceError> {
    decode(json, SheetValues::houses)
}

/// Decode a results payload (JSON array of rows or a sheet `values` grid)
pub fn decode_event_rows(json: &str) -> Result<Vec<EventRow>, SourceError> {
    decode(json, SheetValues::event_rows)
}

/// Where loaded data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Live,
    Fallback,
}

/// Data plus an optional non-fatal advisory for the page
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub data: Vec<T>,
    pub origin: Origin,
    pub advisory: Option<String>,
}

impl<T> Loaded<T> {
    pub fn live(data: Vec<T>) -> Self {
        Self {
            data,
            origin: Origin::Live,
            advisory: None,
        }
    }

    /// Keep a successful read, otherwise log and substitute `fallback`
    pub fn or_fallback(
        result: Result<Vec<T>, SourceError>,
        fallback: impl FnOnce() -> Vec<T>,
        what: &str,
    ) -> Self {
        match result {
            Ok(data) if !data.is_empty() => Self::live(data),
            Ok(_) => Self::fallback(SourceError::Empty, fallback, what),
            Err(e) => Self::fallback(e, fallback, what),
        }
    }

    fn fallback(error: SourceError, fallback: impl FnOnce() -> Vec<T>, what: &str) -> Self {
        log::warn!("Error fetching {} data: {}", what, error);
        Self {
            data: fallback(),
            origin: Origin::Fallback,
            advisory: Some(format!("Failed to load {what} data. Using fallback data.")),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }
}

/// Houses with the static list as fallback
pub fn load_houses(result: Result<Vec<House>, SourceError>) -> Loaded<House> {
    Loaded::or_fallback(result, fallback::houses, "house")
}

/// Results for one competition with the (empty) static fallback
pub fn load_event_rows(
    competition: Competition,
    result: Result<Vec<EventRow>, SourceError>,
) -> Loaded<EventRow> {
    Loaded::or_fallback(result, fallback::event_rows, competition.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_house_array() {
        let houses =
            decode_houses(r##"[{"name":"Red","color":"#f00","points":3,"layatharang":1,"chakravyuh":2}]"##)
                .unwrap();
        assert_eq!(houses.len(), 1);
        assert_eq!(houses[0].chakravyuh, 2);
    }

    #[test]
    fn test_decode_house_sheet_grid() {
        let houses = decode_houses(r#"{"values":[["Red","1","2","3"]]}"#).unwrap();
        assert_eq!(houses[0].points, 3);
    }

    #[test]
    fn test_decode_event_rows() {
        let rows = decode_event_rows(
            r#"[{"event":"Quiz","firstName":"Asha & Bala","firstHouse":"Red","secondName":null,"secondHouse":null,"thirdName":null,"thirdHouse":null}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].first_name.as_deref(), Some("Asha & Bala"));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_houses("[]"), Err(SourceError::Empty)));
        assert!(matches!(decode_houses("{\"values\":[]}"), Err(SourceError::Empty)));
        assert!(matches!(decode_houses("not json"), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_fallback_on_failure_surfaces_advisory() {
        let loaded = load_houses(Err(SourceError::Status(500)));
        assert!(loaded.is_fallback());
        assert_eq!(loaded.data, fallback::houses());
        assert_eq!(loaded.advisory.as_deref(), Some(HOUSES_ADVISORY));
    }

    #[test]
    fn test_fallback_on_empty_result() {
        let loaded = load_houses(Ok(Vec::new()));
        assert!(loaded.is_fallback());
        assert!(!loaded.data.is_empty());
    }

    #[test]
    fn test_live_data_passes_through() {
        let loaded = load_houses(Ok(vec![House::new("Red", "#f00")]));
        assert_eq!(loaded.origin, Origin::Live);
        assert!(loaded.advisory.is_none());
        assert_eq!(loaded.data.len(), 1);
    }

    #[test]
    fn test_event_fallback_is_empty_not_error() {
        let loaded = load_event_rows(Competition::Chakravyuh, Err(SourceError::Timeout(5000)));
        assert!(loaded.data.is_empty());
        assert!(loaded.advisory.unwrap().contains("Chakravyuh"));
    }

    #[test]
    fn test_competition_routes() {
        assert_eq!(Competition::Chakravyuh.api_path(), "/api/chakravyuh");
        assert_eq!(Competition::Layatharang.score_field(), ScoreField::Layatharang);
    }
}
