//! Tie merging: one record per distinct event name

use std::collections::HashMap;

use super::record::{EventRow, PlacementRecord};

/// Merge raw rows into one record per event, in order of first appearance
pub fn merge_by_event(rows: &[EventRow]) -> Vec<PlacementRecord> {
    merge_records(rows.iter().map(PlacementRecord::from_row))
}

/// Merge already-split records sharing an event name
///
/// Each field of the merged record is the union of that field across the
/// group, values kept in first-seen order. A group of one passes through as is.
pub fn merge_records<I>(records: I) -> Vec<PlacementRecord>
where
    I: IntoIterator<Item = PlacementRecord>,
{
    let mut merged: Vec<PlacementRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        match index.get(&record.event) {
            Some(&i) => merged[i].absorb(&record),
            None => {
                index.insert(record.event.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged
}
