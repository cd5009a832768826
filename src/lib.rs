//! House Cup - house standings, event results and the Cup Jump mini-game
//!
//! Core modules:
//! - `results`: Event result aggregation (tie merging, filter options, filtered views)
//! - `standings`: House ranking for the overall and per-competition scoreboards
//! - `sim`: Cup Jump simulation (physics, obstacles, collisions, scoring)
//! - `source`: Data-source contracts, sheet decoding and static fallback
//! - `config`: Runtime data-source configuration
//! - `settings` / `highscores`: Player preferences and best runs (LocalStorage on web)

pub mod config;
pub mod highscores;
pub mod results;
pub mod settings;
pub mod sim;
pub mod source;
pub mod standings;

pub use config::SourceConfig;
pub use highscores::HighScores;
pub use settings::Settings;
pub use standings::{House, ScoreField, Scoreboards, Standings};

/// Game configuration constants
pub mod consts {
    /// Playfield height (pixels)
    pub const GAME_HEIGHT: f32 = 200.0;
    /// Viewport width the base tuning was authored against
    pub const REFERENCE_WIDTH: f32 = 800.0;
    /// Viewport width assumed before the host reports one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    /// Lower bound for the width ratio (zero-width viewports still move)
    pub const MIN_WIDTH_RATIO: f32 = 0.05;

    /// Avatar hitbox
    pub const AVATAR_WIDTH: f32 = 40.0;
    pub const AVATAR_HEIGHT: f32 = 60.0;
    /// Avatar x is min(AVATAR_MAX_X, width * AVATAR_X_FRACTION)
    pub const AVATAR_MAX_X: f32 = 50.0;
    pub const AVATAR_X_FRACTION: f32 = 0.15;

    /// Downward acceleration per tick at the reference width
    pub const GRAVITY: f32 = 0.6;
    /// Gravity scales by min(1, ratio * GRAVITY_RATIO_FACTOR)
    pub const GRAVITY_RATIO_FACTOR: f32 = 0.9;
    /// Upward impulse at the reference width
    pub const BASE_JUMP_FORCE: f32 = 15.0;
    /// Jump ratio floor so narrow screens can still clear a cup
    pub const MIN_JUMP_RATIO: f32 = 0.7;

    /// Cup (obstacle) size caps
    pub const CUP_WIDTH: f32 = 30.0;
    pub const CUP_HEIGHT: f32 = 40.0;
    pub const CUP_WIDTH_FRACTION: f32 = 0.08;
    pub const CUP_HEIGHT_FRACTION: f32 = 0.1;

    /// Scroll speed per tick at the reference width
    pub const BASE_OBSTACLE_SPEED: f32 = 6.0;
    /// Speed added each time the score crosses a milestone
    pub const SPEED_INCREMENT: f32 = 0.5;
    pub const SPEED_MILESTONE: u32 = 5;

    /// Time between cup spawns
    pub const OBSTACLE_INTERVAL_MS: f64 = 1500.0;
    /// Viewports narrower than this get a later first spawn
    pub const NARROW_VIEWPORT_WIDTH: f32 = 400.0;
    pub const NARROW_SPAWN_DELAY_MS: f64 = 500.0;

    /// Backdrop flips between dark and light on this period
    pub const BACKDROP_TOGGLE_MS: f64 = 10_000.0;
    /// Top-left corner reserved for the hidden avatar button
    pub const SECRET_ZONE_PX: f32 = 40.0;
    /// Taps on the hidden button needed to swap the avatar
    pub const SECRET_TAPS: u8 = 5;

    /// Frame delta used when the host has no previous timestamp
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest frame delta fed to the run clock (tab switches, stalls)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Ground position of the avatar's top edge
#[inline]
pub const fn floor_level() -> f32 {
    consts::GAME_HEIGHT - consts::AVATAR_HEIGHT
}

/// Viewport width relative to the reference width, floored at `MIN_WIDTH_RATIO`
#[inline]
pub fn width_ratio(width: f32) -> f32 {
    let ratio = width / consts::REFERENCE_WIDTH;
    if ratio.is_finite() {
        ratio.max(consts::MIN_WIDTH_RATIO)
    } else {
        consts::MIN_WIDTH_RATIO
    }
}
