//! Per-frame simulation tick
//!
//! Core game loop: one call per rendered frame while the page is visible.
//! Inputs queued since the previous frame are applied first, then the run
//! advances physics, spawning, scrolling, scoring and collision in that order.

use super::collision::find_collision;
use super::state::{GameState, Obstacle};
use crate::consts::*;

/// Input events for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Space / click / tap
    pub jump: bool,
    /// Start or Play Again button
    pub restart: bool,
    /// Backdrop timer fired
    pub toggle_backdrop: bool,
    /// Avatar swap key
    pub toggle_avatar: bool,
    /// Hidden corner button tapped
    pub secret_tap: bool,
    /// Surface width changed
    pub resize: Option<f32>,
}

impl TickInput {
    /// Map a keyboard `code`; returns true when the key is consumed
    pub fn apply_key_code(&mut self, code: &str) -> bool {
        match code {
            "Space" => {
                self.jump = true;
                true
            }
            "KeyR" => {
                self.toggle_avatar = true;
                true
            }
            _ => false,
        }
    }

    /// Map a touch at playfield coordinates; returns true when it jumps
    pub fn apply_touch(&mut self, x: f32, y: f32) -> bool {
        if touch_triggers_jump(x, y) {
            self.jump = true;
            true
        } else {
            false
        }
    }

    /// Drop one-shot events after they have been applied
    pub fn clear_events(&mut self) {
        *self = Self::default();
    }
}

/// The top-left corner belongs to the hidden avatar button
pub fn touch_triggers_jump(x: f32, y: f32) -> bool {
    x > SECRET_ZONE_PX || y > SECRET_ZONE_PX
}

/// What changed during a tick, for the host (timers, persistence, sound)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// A run began this tick
    pub started: bool,
    /// Id of a cup spawned this tick
    pub spawned: Option<u64>,
    /// Cups newly passed this tick
    pub passed: u32,
    /// Speed milestones crossed this tick
    pub speed_ups: u32,
    /// Id of the cup that ended the run
    pub collided_with: Option<u64>,
}

/// Advance the game by one frame
///
/// `dt_ms` only drives the run clock (spawn timing); motion is per tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Cosmetic events apply in every phase
    if input.toggle_backdrop {
        state.cosmetics.toggle_backdrop();
    }
    if input.toggle_avatar {
        state.cosmetics.toggle_avatar();
    }
    if input.secret_tap {
        state.cosmetics.register_secret_tap();
    }
    if let Some(width) = input.resize {
        state.resize(width);
    }

    let was_running = state.is_running();
    if input.restart {
        state.restart();
    }
    if input.jump {
        state.jump();
    }
    outcome.started = !was_running && state.is_running();

    // Idle and GameOver are frozen
    if !state.is_running() {
        return outcome;
    }

    state.ticks += 1;
    if dt_ms.is_finite() && dt_ms > 0.0 {
        state.clock_ms += dt_ms.min(MAX_FRAME_MS);
    }

    let gravity = state.viewport.scaled_gravity();
    state.avatar.integrate(gravity);

    outcome.spawned = spawn_obstacle(state);

    outcome.passed = advance_obstacles(state);
    outcome.speed_ups = award_points(state, outcome.passed);

    let hit = find_collision(&state.avatar, &state.viewport, &state.obstacles).map(|o| o.id);
    if let Some(id) = hit {
        outcome.collided_with = Some(id);
        state.end_run();
    }

    outcome
}

/// Spawn a cup at the right edge once the interval has elapsed
fn spawn_obstacle(state: &mut GameState) -> Option<u64> {
    if state.clock_ms - state.last_spawn_ms <= OBSTACLE_INTERVAL_MS {
        return None;
    }
    let (width, height) = state.viewport.cup_size();
    let id = state.clock_ms as u64;
    state.obstacles.push(Obstacle {
        id,
        x: state.viewport.width,
        width,
        height,
    });
    state.last_spawn_ms = state.clock_ms;
    log::trace!("Spawned cup {} ({}x{})", id, width, height);
    Some(id)
}

/// Scroll cups left, drop those off screen, and count newly passed ones
///
/// A cup is passed when it goes from in front of the crossing point to at or
/// behind it within this tick.
fn advance_obstacles(state: &mut GameState) -> u32 {
    let step = state.scaled_speed();
    let crossing = state.viewport.crossing_x();
    let mut passed = 0;

    for obstacle in &mut state.obstacles {
        let was_ahead = obstacle.x > crossing;
        obstacle.x -= step;
        if was_ahead && obstacle.x <= crossing && !obstacle.is_offscreen() {
            passed += 1;
        }
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    passed
}

/// Add passed cups to the score and ratchet speed at each milestone crossed
fn award_points(state: &mut GameState, passed: u32) -> u32 {
    if passed == 0 {
        return 0;
    }
    let before = state.score;
    state.score = state.score.saturating_add(passed);

    let crossed = state.score / SPEED_MILESTONE - before / SPEED_MILESTONE;
    if crossed > 0 {
        state.speed += SPEED_INCREMENT * crossed as f32;
        log::debug!("Score {} - speed now {}", state.score, state.speed);
    }
    crossed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Avatar, GamePhase};

    const DT: f64 = 16.0;

    fn running() -> GameState {
        let mut state = GameState::default();
        state.start_run();
        state
    }

    fn cup(id: u64, x: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            width: CUP_WIDTH,
            height: CUP_HEIGHT,
        }
    }

    /// Avatar pinned to the ceiling so cups can pass without a collision
    fn lofted(mut state: GameState) -> GameState {
        state.avatar = Avatar {
            y: 0.0,
            y_velocity: 0.0,
        };
        state
    }

    #[test]
    fn test_tick_idle_is_frozen() {
        let mut state = GameState::default();
        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.clock_ms, 0.0);
    }

    #[test]
    fn test_first_jump_starts_run_without_jumping() {
        let mut state = GameState::default();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &input, DT);
        assert!(outcome.started);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.avatar.is_grounded());
        assert_eq!(state.avatar.y_velocity, 0.0);
    }

    #[test]
    fn test_jump_while_running() {
        let mut state = running();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.avatar.y < crate::floor_level());
        let airborne_velocity = state.avatar.y_velocity;
        assert!(airborne_velocity < 0.0);

        // Second jump mid-air only gets gravity
        tick(&mut state, &input, DT);
        let gravity = state.viewport.scaled_gravity();
        assert!((state.avatar.y_velocity - (airborne_velocity + gravity)).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = running();
        let mut first_spawn = None;
        for _ in 0..20 {
            let outcome = tick(&mut state, &TickInput::default(), 100.0);
            if outcome.spawned.is_some() {
                first_spawn = outcome.spawned;
                break;
            }
        }
        // 15 ticks reach exactly 1500 ms; the spawn needs strictly more
        assert_eq!(first_spawn, Some(1600));
        assert_eq!(state.obstacles.len(), 1);
        let cup = state.obstacles[0];
        assert_eq!((cup.width, cup.height), (CUP_WIDTH, CUP_HEIGHT));
        assert_eq!(cup.x, state.viewport.width - state.scaled_speed());
    }

    #[test]
    fn test_spawned_cups_are_capped_on_narrow_viewports() {
        let mut state = GameState::new(250.0);
        state.start_run();
        for _ in 0..25 {
            tick(&mut state, &TickInput::default(), 100.0);
        }
        let cup = state.obstacles.first().copied().unwrap();
        assert!((cup.width - 20.0).abs() < 1e-4);
        assert!((cup.height - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_offscreen_cups_are_removed() {
        let mut state = lofted(running());
        state.obstacles.push(cup(1, -25.0));
        state.obstacles.push(cup(2, 300.0));
        tick(&mut state, &TickInput::default(), DT);
        let ids: Vec<_> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_passing_a_cup_scores_once() {
        let mut state = lofted(running());
        // Crossing point is 70 at the reference width; speed 6 per tick
        state.obstacles.push(cup(1, 74.0));
        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome.passed, 1);
        assert_eq!(state.score, 1);

        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome.passed, 0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_milestone_raises_speed_exactly_once() {
        let mut state = lofted(running());
        state.score = 4;
        state.obstacles.push(cup(1, 72.0));
        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 5);
        assert_eq!(outcome.speed_ups, 1);
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED + SPEED_INCREMENT);

        // Further ticks without a crossing keep the speed
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED + SPEED_INCREMENT);
    }

    #[test]
    fn test_batch_crossing_one_milestone_raises_speed_once() {
        let mut state = lofted(running());
        state.score = 3;
        state.obstacles.push(cup(1, 72.0));
        state.obstacles.push(cup(2, 75.0));
        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome.passed, 2);
        assert_eq!(state.score, 5);
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED + SPEED_INCREMENT);

        let mut state = lofted(running());
        state.score = 4;
        state.obstacles.push(cup(1, 72.0));
        state.obstacles.push(cup(2, 75.0));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 6);
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED + SPEED_INCREMENT);
    }

    #[test]
    fn test_collision_ends_run_once_and_freezes() {
        let mut state = running();
        state.score = 12;
        state.high_score = 5;
        state.obstacles.push(cup(42, 60.0));

        let outcome = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(outcome.collided_with, Some(42));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 12);

        let frozen = (state.avatar, state.obstacles.clone(), state.score, state.ticks, state.clock_ms);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..5 {
            let outcome = tick(&mut state, &jump, DT);
            assert_eq!(outcome.collided_with, None);
            assert!(!outcome.started);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            (state.avatar, state.obstacles.clone(), state.score, state.ticks, state.clock_ms),
            frozen
        );
    }

    #[test]
    fn test_high_score_keeps_best() {
        let mut state = running();
        state.score = 3;
        state.high_score = 20;
        state.obstacles.push(cup(1, 60.0));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 20);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = running();
        state.obstacles.push(cup(1, 60.0));
        state.speed = 8.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &restart, DT);
        assert!(outcome.started);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.speed, BASE_OBSTACLE_SPEED);
    }

    #[test]
    fn test_cosmetic_events_apply_in_any_phase() {
        let mut state = GameState::default();
        let input = TickInput {
            toggle_backdrop: true,
            toggle_avatar: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.cosmetics.dark_backdrop);
        assert!(state.cosmetics.custom_avatar);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_resize_rescales_speed() {
        let mut state = running();
        let input = TickInput {
            resize: Some(400.0),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.viewport.width, 400.0);
        assert!((state.scaled_speed() - BASE_OBSTACLE_SPEED * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_key_and_touch_mapping() {
        let mut input = TickInput::default();
        assert!(input.apply_key_code("Space"));
        assert!(input.jump);
        assert!(input.apply_key_code("KeyR"));
        assert!(input.toggle_avatar);
        assert!(!input.apply_key_code("KeyQ"));

        let mut input = TickInput::default();
        assert!(!input.apply_touch(10.0, 12.0));
        assert!(!input.jump);
        assert!(input.apply_touch(10.0, 120.0));
        assert!(input.jump);
    }

    #[test]
    fn test_clear_events_resets_everything() {
        let mut input = TickInput {
            jump: true,
            secret_tap: true,
            resize: Some(10.0),
            ..Default::default()
        };
        input.clear_events();
        assert_eq!(input, TickInput::default());
    }

    #[test]
    fn test_same_inputs_same_run() {
        let play = || {
            let mut state = GameState::default();
            for i in 0..900u32 {
                let input = TickInput {
                    jump: i % 45 == 0,
                    ..Default::default()
                };
                tick(&mut state, &input, 1000.0 / 60.0);
            }
            state
        };
        let a = play();
        let b = play();
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.avatar, b.avatar);
    }
}
