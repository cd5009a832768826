//! Viewport-relative scaling
//!
//! Tuning was authored against an 800 px wide playfield. Speeds, impulses and
//! cup sizes scale with the reported width so narrow screens feel the same.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::width_ratio;

/// Rendering surface the simulation is scaled to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels (height is fixed at `GAME_HEIGHT`)
    pub width: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        Self { width }
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        width_ratio(self.width)
    }

    /// Per-tick scroll distance for an unscaled speed
    pub fn scaled_speed(&self, speed: f32) -> f32 {
        speed * self.ratio()
    }

    /// Upward impulse, floored so small screens can still clear a cup
    pub fn scaled_jump_force(&self) -> f32 {
        BASE_JUMP_FORCE * self.ratio().max(MIN_JUMP_RATIO)
    }

    /// Gravity, softened slightly on narrow screens
    pub fn scaled_gravity(&self) -> f32 {
        GRAVITY * (self.ratio() * GRAVITY_RATIO_FACTOR).min(1.0)
    }

    /// Fixed horizontal position of the avatar's left edge
    pub fn avatar_x(&self) -> f32 {
        AVATAR_MAX_X.min(self.width * AVATAR_X_FRACTION)
    }

    /// Point an obstacle must cross to count as passed
    pub fn crossing_x(&self) -> f32 {
        self.avatar_x() + AVATAR_WIDTH / 2.0
    }

    /// Size of a newly spawned cup
    pub fn cup_size(&self) -> (f32, f32) {
        (
            CUP_WIDTH.min(self.width * CUP_WIDTH_FRACTION),
            CUP_HEIGHT.min(self.width * CUP_HEIGHT_FRACTION),
        )
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_VIEWPORT_WIDTH
    }
}
