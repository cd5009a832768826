//! Cup Jump simulation
//!
//! All gameplay logic lives here. This module is pure and deterministic:
//! - One `tick` per frame, inputs applied at the start of the tick
//! - No randomness
//! - No rendering or platform dependencies

pub mod collision;
pub mod interval;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{Aabb, avatar_box, find_collision, obstacle_box};
pub use interval::Interval;
pub use state::{Avatar, Cosmetics, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, TickOutcome, tick, touch_triggers_jump};
pub use viewport::Viewport;
