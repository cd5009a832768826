//! Filtered result views
//!
//! Filtering always runs against the raw rows and merges afterwards. For house
//! filters the matched positions and names are captured per row before the
//! merge, so a tie spanning several houses still reports only the competitor
//! that belongs to the filtered house.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::options::FilterOptions;
use super::record::{EventRow, PlacementRecord, Position};
use super::values::ValueSet;

/// What the filter value is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Event,
    Name,
    House,
}

/// Active results filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterContext {
    pub mode: FilterMode,
    pub value: String,
}

impl FilterContext {
    /// Unfiltered view (also the reset target after a filter miss)
    pub fn all() -> Self {
        Self::default()
    }

    pub fn event(value: impl Into<String>) -> Self {
        Self {
            mode: FilterMode::Event,
            value: value.into(),
        }
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self {
            mode: FilterMode::Name,
            value: value.into(),
        }
    }

    pub fn house(value: impl Into<String>) -> Self {
        Self {
            mode: FilterMode::House,
            value: value.into(),
        }
    }

    /// Classify a value picked from the combined dropdown
    ///
    /// `"all"` or blank selects everything; otherwise events win over names,
    /// and anything that is neither is treated as a house.
    pub fn resolve(value: &str, options: &FilterOptions) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::all()
        } else if options.has_event(value) {
            Self::event(value)
        } else if options.has_name(value) {
            Self::name(value)
        } else {
            Self::house(value)
        }
    }
}

/// Where the filtered house placed within one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterProjection {
    pub house: String,
    /// Positions held by the house, in rank order
    pub positions: Vec<Position>,
    /// The house's own competitors at each held position
    pub names: BTreeMap<Position, ValueSet>,
}

impl FilterProjection {
    fn capture(row: &PlacementRecord, house: &str) -> Self {
        let positions = row.positions_of_house(house);
        let names = positions
            .iter()
            .map(|&position| (position, row.placement(position).names.clone()))
            .filter(|(_, names)| !names.is_empty())
            .collect();
        Self {
            house: house.to_string(),
            positions,
            names,
        }
    }

    fn absorb(&mut self, other: FilterProjection) {
        for position in other.positions {
            if !self.positions.contains(&position) {
                self.positions.push(position);
            }
        }
        self.positions.sort();
        for (position, names) in other.names {
            self.names.entry(position).or_insert(names);
        }
    }

    /// Competitors to show for a position (the house's own, not the whole tie)
    pub fn names_at(&self, position: Position) -> Option<&ValueSet> {
        self.names.get(&position)
    }

    /// True when the house placed more than once in the event
    pub fn has_multiple_placements(&self) -> bool {
        self.positions.len() > 1
    }
}

/// A merged record plus, under a house filter, the house's projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredRecord {
    pub base: PlacementRecord,
    pub filter: Option<FilterProjection>,
}

/// Filter raw rows by `ctx`, then merge ties
pub fn apply_filter(rows: &[EventRow], ctx: &FilterContext) -> Vec<FilteredRecord> {
    let value = ctx.value.trim();
    let kept = rows.iter().map(PlacementRecord::from_row).filter_map(|record| {
        let keep = match ctx.mode {
            FilterMode::All => true,
            FilterMode::Event => record.event == value,
            FilterMode::Name => record.has_name(value),
            FilterMode::House => !record.positions_of_house(value).is_empty(),
        };
        if !keep {
            return None;
        }
        let projection = match ctx.mode {
            FilterMode::House => Some(FilterProjection::capture(&record, value)),
            _ => None,
        };
        Some(FilteredRecord {
            base: record,
            filter: projection,
        })
    });

    let mut merged: Vec<FilteredRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for item in kept {
        match index.get(&item.base.event) {
            Some(&i) => {
                let target = &mut merged[i];
                target.base.absorb(&item.base);
                if let Some(theirs) = item.filter {
                    match target.filter.as_mut() {
                        Some(ours) => ours.absorb(theirs),
                        None => target.filter = Some(theirs),
                    }
                }
            }
            None => {
                index.insert(item.base.event.clone(), merged.len());
                merged.push(item);
            }
        }
    }

    log::debug!(
        "filter {:?} {:?}: {} rows -> {} records",
        ctx.mode,
        value,
        rows.len(),
        merged.len()
    );
    merged
}
