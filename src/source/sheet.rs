//! Spreadsheet `values` payloads
//!
//! The Sheets API returns a grid of cells. Houses live in `A2:E`
//! (name, layatharang, chakravyuh, points, color) and each competition's
//! results in `A2:G` (event, then name/house pairs for 1st..3rd).

use serde::Deserialize;
use serde_json::Value;

use crate::results::EventRow;
use crate::standings::House;

/// Colour used when a house row has none
pub const DEFAULT_HOUSE_COLOR: &str = "#000000";

/// Raw `values` grid from a range read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetValues {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

fn cell_text(row: &[Value], index: usize) -> String {
    match row.get(index) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_opt(row: &[Value], index: usize) -> Option<String> {
    let text = cell_text(row, index);
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Leading-integer parse: optional sign then digits, anything else is 0
pub fn parse_int(text: &str) -> i64 {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|v| sign * v).unwrap_or(0)
}

impl SheetValues {
    /// Map house rows; short rows are padded with defaults
    pub fn houses(&self) -> Vec<House> {
        self.values
            .iter()
            .map(|row| {
                let color = cell_text(row, 4);
                House {
                    name: cell_text(row, 0),
                    layatharang: parse_int(&cell_text(row, 1)),
                    chakravyuh: parse_int(&cell_text(row, 2)),
                    points: parse_int(&cell_text(row, 3)),
                    color: if color.trim().is_empty() {
                        DEFAULT_HOUSE_COLOR.to_string()
                    } else {
                        color
                    },
                }
            })
            .collect()
    }

    /// Map result rows; blank cells become `None`
    pub fn event_rows(&self) -> Vec<EventRow> {
        self.values
            .iter()
            .map(|row| EventRow {
                event: cell_text(row, 0),
                first_name: cell_opt(row, 1),
                first_house: cell_opt(row, 2),
                second_name: cell_opt(row, 3),
                second_house: cell_opt(row, 4),
                third_name: cell_opt(row, 5),
                third_house: cell_opt(row, 6),
            })
            .collect()
    }
}
