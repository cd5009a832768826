//! Raw event rows and merged placement records

use serde::{Deserialize, Deserializer, Serialize};

use super::values::ValueSet;

/// Podium position within an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    First,
    Second,
    Third,
}

impl Position {
    /// All positions in rank order
    pub const ALL: [Position; 3] = [Position::First, Position::Second, Position::Third];

    /// Display label ("1st", "2nd", "3rd")
    pub fn label(&self) -> &'static str {
        match self {
            Position::First => "1st",
            Position::Second => "2nd",
            Position::Third => "3rd",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One raw row from the results sheet, as served by the data source
///
/// Any name/house field may hold several co-placed values joined by `" & "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub first_house: Option<String>,
    #[serde(default)]
    pub second_name: Option<String>,
    #[serde(default)]
    pub second_house: Option<String>,
    #[serde(default)]
    pub third_name: Option<String>,
    #[serde(default)]
    pub third_house: Option<String>,
}

impl EventRow {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for one position's name and house
    pub fn with(mut self, position: Position, name: Option<&str>, house: Option<&str>) -> Self {
        let name = name.map(str::to_string);
        let house = house.map(str::to_string);
        match position {
            Position::First => {
                self.first_name = name;
                self.first_house = house;
            }
            Position::Second => {
                self.second_name = name;
                self.second_house = house;
            }
            Position::Third => {
                self.third_name = name;
                self.third_house = house;
            }
        }
        self
    }

    /// Raw (name, house) fields for a position
    pub fn fields(&self, position: Position) -> (Option<&str>, Option<&str>) {
        match position {
            Position::First => (self.first_name.as_deref(), self.first_house.as_deref()),
            Position::Second => (self.second_name.as_deref(), self.second_house.as_deref()),
            Position::Third => (self.third_name.as_deref(), self.third_house.as_deref()),
        }
    }
}

/// Names and houses placed at one position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub names: ValueSet,
    pub houses: ValueSet,
}

/// Results for one event after ties have been merged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub event: String,
    placements: [Placement; 3],
}

impl PlacementRecord {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            placements: Default::default(),
        }
    }

    /// Split a raw row into explicit value sets; the event name is trimmed
    pub fn from_row(row: &EventRow) -> Self {
        let mut record = Self::new(row.event.trim());
        for position in Position::ALL {
            let (name, house) = row.fields(position);
            let placement = record.placement_mut(position);
            placement.names = ValueSet::parse(name);
            placement.houses = ValueSet::parse(house);
        }
        record
    }

    /// Presentation form with multi-valued fields joined by `" & "`
    pub fn to_row(&self) -> EventRow {
        let mut row = EventRow::new(self.event.clone());
        for position in Position::ALL {
            let placement = self.placement(position);
            let name = placement.names.joined();
            let house = placement.houses.joined();
            row = row.with(position, name.as_deref(), house.as_deref());
        }
        row
    }

    pub fn placement(&self, position: Position) -> &Placement {
        &self.placements[position.index()]
    }

    pub fn placement_mut(&mut self, position: Position) -> &mut Placement {
        &mut self.placements[position.index()]
    }

    /// Iterate placements in rank order
    pub fn placements(&self) -> impl Iterator<Item = (Position, &Placement)> {
        Position::ALL.into_iter().zip(self.placements.iter())
    }

    /// Union another record's values into this one, field by field
    pub fn absorb(&mut self, other: &PlacementRecord) {
        for position in Position::ALL {
            let theirs = other.placement(position);
            let ours = self.placement_mut(position);
            ours.names.union_with(&theirs.names);
            ours.houses.union_with(&theirs.houses);
        }
    }

    /// An event is individual only when every position has a named competitor;
    /// anything else is shown as a house-level (group) event.
    pub fn is_group_event(&self) -> bool {
        !self.placements.iter().all(|p| !p.names.is_empty())
    }

    /// Positions whose houses include `house`, in rank order
    pub fn positions_of_house(&self, house: &str) -> Vec<Position> {
        self.placements()
            .filter(|(_, p)| p.houses.contains(house))
            .map(|(position, _)| position)
            .collect()
    }

    /// True if `name` is placed anywhere in this event
    pub fn has_name(&self, name: &str) -> bool {
        self.placements.iter().any(|p| p.names.contains(name))
    }
}
