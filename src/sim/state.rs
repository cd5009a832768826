//! Game state and core simulation types
//!
//! One authoritative `GameState` per session. Presentation reads it after
//! each tick; nothing else mutates it.

use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::consts::*;
use crate::floor_level;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet; first interaction starts the run
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision; only a restart leaves this phase
    GameOver,
}

/// The jumping avatar (vertical state only, x is fixed by the viewport)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top edge, measured down from the playfield top
    pub y: f32,
    /// Positive is downward
    pub y_velocity: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            y: floor_level(),
            y_velocity: 0.0,
        }
    }
}

impl Avatar {
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.y >= floor_level()
    }

    /// One step of vertical motion, clamped between ceiling and floor
    pub fn integrate(&mut self, gravity: f32) {
        self.y_velocity += gravity;
        self.y += self.y_velocity;

        let floor = floor_level();
        if self.y > floor {
            self.y = floor;
            self.y_velocity = 0.0;
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.y_velocity = 0.0;
        }
    }
}

/// A cup scrolling toward the avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Run-clock time of creation (ms); unique within a run
    pub id: u64,
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Fully scrolled past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.x <= -self.width
    }
}

/// Purely visual state; never read by the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetics {
    pub dark_backdrop: bool,
    pub custom_avatar: bool,
    /// Taps on the hidden corner button since the last swap
    pub secret_taps: u8,
}

impl Default for Cosmetics {
    fn default() -> Self {
        Self {
            dark_backdrop: true,
            custom_avatar: false,
            secret_taps: 0,
        }
    }
}

impl Cosmetics {
    pub fn toggle_backdrop(&mut self) {
        self.dark_backdrop = !self.dark_backdrop;
    }

    pub fn toggle_avatar(&mut self) {
        self.custom_avatar = !self.custom_avatar;
    }

    /// Count a hidden-button tap; every `SECRET_TAPS`th tap swaps the avatar
    pub fn register_secret_tap(&mut self) -> bool {
        if self.secret_taps + 1 >= SECRET_TAPS {
            self.secret_taps = 0;
            self.toggle_avatar();
            true
        } else {
            self.secret_taps += 1;
            false
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub avatar: Avatar,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub high_score: u32,
    /// Unscaled scroll speed; ratchets up at score milestones
    pub speed: f32,
    /// Milliseconds of running time in the current run
    pub clock_ms: f64,
    /// Run-clock time the spawn interval is measured from
    pub last_spawn_ms: f64,
    /// Ticks simulated in the current run
    pub ticks: u64,
    pub cosmetics: Cosmetics,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH)
    }
}

impl GameState {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            phase: GamePhase::Idle,
            viewport: Viewport::new(viewport_width),
            avatar: Avatar::default(),
            obstacles: Vec::new(),
            score: 0,
            high_score: 0,
            speed: BASE_OBSTACLE_SPEED,
            clock_ms: 0.0,
            last_spawn_ms: 0.0,
            ticks: 0,
            cosmetics: Cosmetics::default(),
        }
    }

    /// Carry over a best score from an earlier session
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Current per-tick scroll distance
    pub fn scaled_speed(&self) -> f32 {
        self.viewport.scaled_speed(self.speed)
    }

    /// Begin a fresh run: empty field, base speed, avatar on the floor
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Running;
        self.avatar = Avatar::default();
        self.obstacles.clear();
        self.score = 0;
        self.speed = BASE_OBSTACLE_SPEED;
        self.clock_ms = 0.0;
        self.ticks = 0;
        self.last_spawn_ms = 0.0;
        self.delay_spawn_if_narrow();
        log::info!("Run started (viewport {}px)", self.viewport.width);
    }

    /// Start trigger: valid from Idle or GameOver, ignored mid-run
    pub fn restart(&mut self) -> bool {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.start_run();
                true
            }
            GamePhase::Running => false,
        }
    }

    /// Jump trigger
    ///
    /// Idle: starts the run without jumping. Running: jumps only when
    /// grounded. GameOver: ignored.
    pub fn jump(&mut self) {
        match self.phase {
            GamePhase::Idle => self.start_run(),
            GamePhase::Running => {
                if self.avatar.is_grounded() {
                    self.avatar.y_velocity = -self.viewport.scaled_jump_force();
                }
            }
            GamePhase::GameOver => {}
        }
    }

    /// Host reported a new surface width
    pub fn resize(&mut self, width: f32) {
        let viewport = Viewport::new(width);
        if viewport == self.viewport {
            return;
        }
        log::debug!("Viewport resized {} -> {}", self.viewport.width, viewport.width);
        self.viewport = viewport;
        self.delay_spawn_if_narrow();
    }

    fn delay_spawn_if_narrow(&mut self) {
        if self.viewport.is_narrow() {
            self.last_spawn_ms = self.clock_ms + NARROW_SPAWN_DELAY_MS;
        }
    }

    /// End the run after a collision
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        log::info!("Game over: score {} (best {})", self.score, self.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_on_floor() {
        let state = GameState::default();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.avatar.is_grounded());
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED);
        assert!(state.cosmetics.dark_backdrop);
    }

    #[test]
    fn test_integrate_lands_and_hits_ceiling() {
        let mut avatar = Avatar {
            y: floor_level() - 1.0,
            y_velocity: 5.0,
        };
        avatar.integrate(0.5);
        assert_eq!(avatar.y, floor_level());
        assert_eq!(avatar.y_velocity, 0.0);

        let mut avatar = Avatar {
            y: 3.0,
            y_velocity: -20.0,
        };
        avatar.integrate(0.5);
        assert_eq!(avatar.y, 0.0);
        assert_eq!(avatar.y_velocity, 0.0);
    }

    #[test]
    fn test_integrate_applies_gravity_before_moving() {
        let mut avatar = Avatar {
            y: 100.0,
            y_velocity: -10.0,
        };
        avatar.integrate(1.0);
        assert_eq!(avatar.y_velocity, -9.0);
        assert_eq!(avatar.y, 91.0);
    }

    #[test]
    fn test_restart_only_from_idle_or_game_over() {
        let mut state = GameState::default();
        assert!(state.restart());
        assert!(state.is_running());
        state.score = 7;
        assert!(!state.restart());
        assert_eq!(state.score, 7);

        state.end_run();
        assert_eq!(state.high_score, 7);
        state.obstacles.push(Obstacle {
            id: 1,
            x: 10.0,
            width: 30.0,
            height: 40.0,
        });
        state.speed = 9.0;
        assert!(state.restart());
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED);
        assert_eq!(state.high_score, 7);
    }

    #[test]
    fn test_jump_from_idle_starts_without_jumping() {
        let mut state = GameState::default();
        state.jump();
        assert!(state.is_running());
        assert_eq!(state.avatar.y_velocity, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut state = GameState::default();
        state.start_run();

        state.avatar.y = 80.0;
        state.avatar.y_velocity = 3.0;
        state.jump();
        assert_eq!(state.avatar.y_velocity, 3.0);

        state.avatar = Avatar::default();
        state.jump();
        assert!(state.avatar.y_velocity < 0.0);
        assert_eq!(state.avatar.y_velocity, -BASE_JUMP_FORCE);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut state = GameState::default();
        state.start_run();
        state.end_run();
        state.jump();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.avatar.y_velocity, 0.0);
    }

    #[test]
    fn test_narrow_viewport_delays_first_spawn() {
        let mut state = GameState::new(320.0);
        state.start_run();
        assert_eq!(state.last_spawn_ms, NARROW_SPAWN_DELAY_MS);

        let mut wide = GameState::new(1024.0);
        wide.start_run();
        assert_eq!(wide.last_spawn_ms, 0.0);
    }

    #[test]
    fn test_secret_taps_swap_avatar_every_fifth() {
        let mut cosmetics = Cosmetics::default();
        for _ in 0..4 {
            assert!(!cosmetics.register_secret_tap());
        }
        assert!(!cosmetics.custom_avatar);
        assert!(cosmetics.register_secret_tap());
        assert!(cosmetics.custom_avatar);
        assert_eq!(cosmetics.secret_taps, 0);
    }
}
