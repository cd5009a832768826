//! Best-runs table
//!
//! Persisted to LocalStorage on the web, keeps the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    /// Cups cleared
    pub score: u32,
    /// Unscaled scroll speed when the run ended
    pub top_speed: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Best runs, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "house_cup_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Zero never qualifies; otherwise a free slot or beating the last entry
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// 1-based rank a score would take, None if it doesn't qualify
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a run; returns the 1-based rank achieved
    ///
    /// Equal scores keep their earlier entries ahead.
    pub fn add_score(&mut self, score: u32, top_speed: f32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                top_speed,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        log::debug!("Run {} took rank {}", score, rank);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the table from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} best runs", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable best runs: {}", e),
                }
            }
        }

        log::info!("No best runs found, starting fresh");
        Self::new()
    }

    /// Save the table to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best runs saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
