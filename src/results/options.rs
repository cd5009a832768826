//! Filter dropdown options

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::record::{EventRow, PlacementRecord};

/// Sorted, de-duplicated values offered by the results filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub houses: Vec<String>,
    pub events: Vec<String>,
    pub names: Vec<String>,
}

impl FilterOptions {
    /// Build options from raw rows (composite fields contribute each component)
    pub fn from_rows(rows: &[EventRow]) -> Self {
        let records: Vec<PlacementRecord> = rows.iter().map(PlacementRecord::from_row).collect();
        filter_options(&records)
    }

    pub fn has_event(&self, value: &str) -> bool {
        self.events.binary_search_by(|e| e.as_str().cmp(value)).is_ok()
    }

    pub fn has_name(&self, value: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(value)).is_ok()
    }
}

/// Collect filter options across records, sorted lexicographically
pub fn filter_options(records: &[PlacementRecord]) -> FilterOptions {
    let mut houses = BTreeSet::new();
    let mut events = BTreeSet::new();
    let mut names = BTreeSet::new();

    for record in records {
        if !record.event.is_empty() {
            events.insert(record.event.clone());
        }
        for (_, placement) in record.placements() {
            houses.extend(placement.houses.iter().map(str::to_string));
            names.extend(placement.names.iter().map(str::to_string));
        }
    }

    FilterOptions {
        houses: houses.into_iter().collect(),
        events: events.into_iter().collect(),
        names: names.into_iter().collect(),
    }
}
