//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be replayed or rebalanced
//! from a JSON file. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How ball displacement relates to the elapsed frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionModel {
    /// Velocity is applied once per frame regardless of elapsed time.
    /// Speed depends on the display refresh rate.
    #[default]
    PerFrame,
    /// Displacement is scaled by `elapsed / NOMINAL_FRAME_MS`
    TimeScaled,
}

impl MotionModel {
    /// Multiplier applied to a ball's velocity for a frame of `elapsed_ms`
    pub fn step_scale(&self, elapsed_ms: f32) -> f32 {
        match self {
            MotionModel::PerFrame => 1.0,
            MotionModel::TimeScaled => (elapsed_ms / NOMINAL_FRAME_MS).max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_radius: f32,
    pub ball_radius: f32,
    pub start_lives: u8,
    pub initial_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    pub spawn_interval_decay: f32,
    pub ball_min_speed: f32,
    pub ball_max_speed: f32,
    pub flash_start: f32,
    pub flash_decay: f32,
    pub motion: MotionModel,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            ball_radius: BALL_RADIUS,
            start_lives: START_LIVES,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            ball_min_speed: BALL_MIN_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            flash_start: FLASH_START,
            flash_decay: FLASH_DECAY,
            motion: MotionModel::PerFrame,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Repair values that would break the simulation, falling back to defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.player_radius > 0.0) {
            self.player_radius = defaults.player_radius;
        }
        if !(self.ball_radius > 0.0) {
            self.ball_radius = defaults.ball_radius;
        }
        if self.start_lives == 0 {
            self.start_lives = defaults.start_lives;
        }
        if !(self.spawn_interval_decay > 0.0 && self.spawn_interval_decay <= 1.0) {
            log::warn!(
                "spawn_interval_decay {} out of range, using {}",
                self.spawn_interval_decay,
                defaults.spawn_interval_decay
            );
            self.spawn_interval_decay = defaults.spawn_interval_decay;
        }
        if !(self.min_spawn_interval_ms > 0.0) {
            self.min_spawn_interval_ms = defaults.min_spawn_interval_ms;
        }
        if !(self.initial_spawn_interval_ms >= self.min_spawn_interval_ms) {
            self.initial_spawn_interval_ms = self.min_spawn_interval_ms;
        }
        if !(self.ball_min_speed > 0.0 && self.ball_min_speed.is_finite()) {
            self.ball_min_speed = defaults.ball_min_speed;
        }
        if !(self.ball_max_speed > self.ball_min_speed) {
            log::warn!(
                "ball speed range [{}, {}) is empty, widening",
                self.ball_min_speed,
                self.ball_max_speed
            );
            self.ball_max_speed = self.ball_min_speed * 2.0;
        }
        // Sampling needs a finite range
        if !self.ball_max_speed.is_finite() {
            log::warn!(
                "ball speed range [{}, {}) is not finite, using defaults",
                self.ball_min_speed,
                self.ball_max_speed
            );
            self.ball_min_speed = defaults.ball_min_speed;
            self.ball_max_speed = defaults.ball_max_speed;
        }
        if !(self.flash_start >= 0.0) {
            self.flash_start = defaults.flash_start;
        }
        if !(self.flash_decay > 0.0) {
            self.flash_decay = defaults.flash_decay;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.start_lives, 3);
        assert_eq!(t.initial_spawn_interval_ms, 2000.0);
        assert_eq!(t.min_spawn_interval_ms, 500.0);
        assert_eq!(t.spawn_interval_decay, 0.98);
        assert!(t.ball_radius < t.player_radius);
        assert_eq!(t.motion, MotionModel::PerFrame);
    }

    #[test]
    fn test_from_json_partial() {
        let t = Tuning::from_json(r#"{ "start_lives": 5, "motion": "TimeScaled" }"#).unwrap();
        assert_eq!(t.start_lives, 5);
        assert_eq!(t.motion, MotionModel::TimeScaled);
        assert_eq!(t.player_radius, PLAYER_RADIUS);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let t = Tuning {
            start_lives: 7,
            ..Default::default()
        };
        let json = t.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_sanitized_repairs_ranges() {
        let t = Tuning {
            start_lives: 0,
            spawn_interval_decay: 1.5,
            min_spawn_interval_ms: 800.0,
            initial_spawn_interval_ms: 300.0,
            ball_min_speed: 5.0,
            ball_max_speed: 3.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(t.start_lives, START_LIVES);
        assert_eq!(t.spawn_interval_decay, SPAWN_INTERVAL_DECAY);
        assert_eq!(t.initial_spawn_interval_ms, 800.0);
        assert!(t.ball_max_speed > t.ball_min_speed);
    }

    #[test]
    fn test_sanitized_huge_speed_falls_back() {
        let t = Tuning::from_json(r#"{ "ball_min_speed": 3e38 }"#).unwrap();
        assert_eq!((t.ball_min_speed, t.ball_max_speed), (BALL_MIN_SPEED, BALL_MAX_SPEED));

        let t = Tuning {
            ball_max_speed: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert!(t.ball_max_speed.is_finite());
        assert!(t.ball_max_speed > t.ball_min_speed);
    }

    #[test]
    fn test_huge_speed_tuning_still_spawns() {
        use crate::Viewport;
        use crate::sim::{GameEvent, GameState, TickInput, tick};

        let tuning = Tuning::from_json(r#"{ "ball_min_speed": 3e38 }"#).unwrap();
        let viewport = Viewport::new(800.0, 600.0);
        let mut state = GameState::with_tuning(4, viewport, tuning);
        state.start(viewport);

        let events = tick(&mut state, &TickInput::default(), 5000.0, viewport);
        assert!(matches!(events[0], GameEvent::BallSpawned { .. }));
        let speed = state.balls[0].vel.length();
        assert!(speed.is_finite() && speed < BALL_MAX_SPEED + 1e-4);
    }

    #[test]
    fn test_step_scale() {
        assert_eq!(MotionModel::PerFrame.step_scale(33.0), 1.0);
        let scale = MotionModel::TimeScaled.step_scale(NOMINAL_FRAME_MS * 2.0);
        assert!((scale - 2.0).abs() < 1e-5);
        assert_eq!(MotionModel::TimeScaled.step_scale(-5.0), 0.0);
    }
}
