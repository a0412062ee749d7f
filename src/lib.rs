//! Color Catch - a color-matching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game phases)
//! - `session`: Game lifecycle around the simulation plus the high score store
//! - `renderer`: Renderer seam and the Canvas 2D implementation
//! - `highscore`: Persisted best score
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod highscore;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscore::{HighScoreStore, MemoryStore};
pub use session::Session;
pub use settings::Settings;
pub use tuning::{MotionModel, Tuning};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player circle radius
    pub const PLAYER_RADIUS: f32 = 30.0;
    /// Ball radius (smaller than the player)
    pub const BALL_RADIUS: f32 = 15.0;
    /// Lives at the start of a game
    pub const START_LIVES: u8 = 3;

    /// Spawn interval at the start of a game (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: f32 = 2000.0;
    /// Spawn interval floor (ms)
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 500.0;
    /// Multiplier applied to the interval after every spawn
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.98;

    /// Ball speed range in px per frame, `[min, max)`
    pub const BALL_MIN_SPEED: f32 = 2.0;
    pub const BALL_MAX_SPEED: f32 = 4.0;

    /// Flash overlay timer at trigger time
    pub const FLASH_START: f32 = 100.0;
    /// Flash timer decay per frame
    pub const FLASH_DECAY: f32 = 5.0;

    /// Frame duration the per-frame velocities are tuned for (60 Hz)
    pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;
}

/// Current drawable area in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport with non-positive (or NaN) dimensions clamped to 1
    pub fn clamped(&self) -> Self {
        Self {
            width: if self.width >= 1.0 { self.width } else { 1.0 },
            height: if self.height >= 1.0 { self.height } else { 1.0 },
        }
    }

    /// Screen center, where the player sits
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
