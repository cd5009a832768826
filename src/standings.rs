//! House standings
//!
//! Three independent scoreboards are projected from the same house list:
//! overall points and the Layatharang / Chakravyuh totals.

use serde::{Deserialize, Serialize};

/// Number of podium (trophy) places
pub const PODIUM_SIZE: usize = 3;

fn default_color() -> String {
    "#000000".to_string()
}

/// A competing house
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub layatharang: i64,
    #[serde(default)]
    pub chakravyuh: i64,
}

impl House {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            points: 0,
            layatharang: 0,
            chakravyuh: 0,
        }
    }
}

/// Which total a scoreboard ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreField {
    #[default]
    Points,
    Layatharang,
    Chakravyuh,
}

impl ScoreField {
    pub const ALL: [ScoreField; 3] = [
        ScoreField::Points,
        ScoreField::Layatharang,
        ScoreField::Chakravyuh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreField::Points => "points",
            ScoreField::Layatharang => "layatharang",
            ScoreField::Chakravyuh => "chakravyuh",
        }
    }

    /// Read this field from a house
    pub fn score(&self, house: &House) -> i64 {
        match self {
            ScoreField::Points => house.points,
            ScoreField::Layatharang => house.layatharang,
            ScoreField::Chakravyuh => house.chakravyuh,
        }
    }
}

/// A house with its position on one scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedHouse {
    /// 1-based output position (ties get consecutive ranks)
    pub rank: usize,
    pub score: i64,
    pub house: House,
}

/// One ranked scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub field: ScoreField,
    pub entries: Vec<RankedHouse>,
    /// Progress-bar denominator, never below 1
    pub max_score: i64,
}

impl Standings {
    /// Fraction of the leader's score, clamped to [0, 1]
    pub fn progress(&self, entry: &RankedHouse) -> f32 {
        (entry.score as f64 / self.max_score as f64).clamp(0.0, 1.0) as f32
    }

    /// Trophy places (at most three)
    pub fn podium(&self) -> &[RankedHouse] {
        &self.entries[..self.entries.len().min(PODIUM_SIZE)]
    }

    pub fn leader(&self) -> Option<&RankedHouse> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank houses by `field`, highest first
///
/// The sort is stable, so equal scores keep their input order and get
/// consecutive ranks.
pub fn rank(houses: &[House], field: ScoreField) -> Standings {
    let mut sorted: Vec<&House> = houses.iter().collect();
    sorted.sort_by(|a, b| field.score(b).cmp(&field.score(a)));

    let entries: Vec<RankedHouse> = sorted
        .into_iter()
        .enumerate()
        .map(|(i, house)| RankedHouse {
            rank: i + 1,
            score: field.score(house),
            house: house.clone(),
        })
        .collect();

    let max_score = entries.iter().map(|e| e.score).max().unwrap_or(0).max(1);

    Standings {
        field,
        entries,
        max_score,
    }
}

/// The three scoreboards shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboards {
    pub overall: Standings,
    pub layatharang: Standings,
    pub chakravyuh: Standings,
}

impl Scoreboards {
    pub fn project(houses: &[House]) -> Self {
        Self {
            overall: rank(houses, ScoreField::Points),
            layatharang: rank(houses, ScoreField::Layatharang),
            chakravyuh: rank(houses, ScoreField::Chakravyuh),
        }
    }

    pub fn board(&self, field: ScoreField) -> &Standings {
        match field {
            ScoreField::Points => &self.overall,
            ScoreField::Layatharang => &self.layatharang,
            ScoreField::Chakravyuh => &self.chakravyuh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_points(name: &str, points: i64) -> House {
        House {
            points,
            ..House::new(name, "#ffffff")
        }
    }

    #[test]
    fn test_rank_is_deterministic_for_ties() {
        let houses = vec![
            with_points("A", 10),
            with_points("B", 30),
            with_points("C", 30),
            with_points("D", 5),
        ];

        for _ in 0..5 {
            let standings = rank(&houses, ScoreField::Points);
            let order: Vec<_> = standings
                .entries
                .iter()
                .map(|e| (e.rank, e.house.name.as_str(), e.score))
                .collect();
            assert_eq!(
                order,
                vec![(1, "B", 30), (2, "C", 30), (3, "A", 10), (4, "D", 5)]
            );
        }
    }

    #[test]
    fn test_max_score_floor() {
        let standings = rank(&[with_points("A", 0), with_points("B", 0)], ScoreField::Points);
        assert_eq!(standings.max_score, 1);
        assert_eq!(standings.progress(&standings.entries[0]), 0.0);

        let empty = rank(&[], ScoreField::Points);
        assert_eq!(empty.max_score, 1);
        assert!(empty.is_empty());
        assert!(empty.podium().is_empty());
    }

    #[test]
    fn test_rank_by_sub_event_field() {
        let mut red = House::new("Red", "#ff0000");
        red.layatharang = 4;
        red.chakravyuh = 9;
        let mut blue = House::new("Blue", "#0000ff");
        blue.layatharang = 7;
        blue.chakravyuh = 2;
        let houses = vec![red, blue];

        let boards = Scoreboards::project(&houses);
        assert_eq!(boards.layatharang.leader().unwrap().house.name, "Blue");
        assert_eq!(boards.chakravyuh.leader().unwrap().house.name, "Red");
        assert_eq!(boards.board(ScoreField::Chakravyuh).max_score, 9);
    }

    #[test]
    fn test_progress_and_podium() {
        let houses: Vec<House> = (1..=5).map(|i| with_points(&format!("H{i}"), i * 10)).collect();
        let standings = rank(&houses, ScoreField::Points);
        assert_eq!(standings.max_score, 50);
        assert_eq!(standings.podium().len(), 3);
        assert_eq!(standings.podium()[0].house.name, "H5");
        let last = standings.entries.last().unwrap();
        assert!((standings.progress(last) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_house_deserializes_with_defaults() {
        let house: House = serde_json::from_str(r#"{"name":"Yodhas","points":7,"rank":2}"#).unwrap();
        assert_eq!(house.color, "#000000");
        assert_eq!(house.points, 7);
        assert_eq!(house.layatharang, 0);
    }
}
