//! Game state and core simulation types
//!
//! All mutable game state lives in [`GameState`], owned by the caller of `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{Color, Command, cycle_index};
use super::spawner::SpawnTimer;
use crate::Viewport;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the start command
    Idle,
    /// Active gameplay
    Playing,
    /// Lives ran out
    GameOver,
}

/// The player's circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Index into the palette
    pub color_index: usize,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            color_index: 0,
        }
    }

    pub fn cycle(&mut self, command: Command) {
        self.color_index = cycle_index(self.color_index, command);
    }
}

/// Current color of the player
#[inline]
pub fn color_of(player: &Player) -> Color {
    Color::from_index(player.color_index)
}

/// A homing ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Which event the flash overlay is cueing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Success,
    Failure,
}

impl FlashKind {
    pub fn css(&self) -> &'static str {
        match self {
            FlashKind::Success => "#0f0",
            FlashKind::Failure => "#f00",
        }
    }
}

/// Full-screen overlay cueing a catch or a lost life
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: Option<FlashKind>,
    pub timer: f32,
}

impl Flash {
    pub fn trigger(&mut self, kind: FlashKind, start: f32) {
        self.kind = Some(kind);
        self.timer = start;
    }

    /// Decay by `amount`, once per frame
    pub fn decay(&mut self, amount: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - amount).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0 && self.kind.is_some()
    }

    /// Overlay opacity in [0, 1] relative to the trigger value
    pub fn opacity(&self, start: f32) -> f32 {
        if start <= 0.0 {
            return 0.0;
        }
        (self.timer / start).clamp(0.0, 1.0)
    }
}

/// Complete state of one game attempt
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Unordered; no identity beyond position in the vec
    pub balls: Vec<Ball>,
    pub score: u64,
    pub lives: u8,
    pub spawn: SpawnTimer,
    pub flash: Flash,
    /// Frames simulated since the last start
    pub frame: u64,
}

impl GameState {
    /// Create an idle game with default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            player: Player::new(viewport.clamped().center(), tuning.player_radius),
            balls: Vec::new(),
            score: 0,
            lives: tuning.start_lives,
            spawn: SpawnTimer::new(tuning.initial_spawn_interval_ms),
            flash: Flash::default(),
            frame: 0,
            tuning,
        }
    }

    /// Idle -> Playing. Returns false (and changes nothing) from any other phase.
    pub fn start(&mut self, viewport: Viewport) -> bool {
        if self.phase != GamePhase::Idle {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.reset(viewport);
        self.phase = GamePhase::Playing;
        log::info!("Game started (seed {})", self.seed);
        true
    }

    /// GameOver -> Idle. Returns false from any other phase.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Idle;
        true
    }

    /// Reset counters, clear balls and center the player. Idempotent.
    pub fn reset(&mut self, viewport: Viewport) {
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.spawn = SpawnTimer::new(self.tuning.initial_spawn_interval_ms);
        self.balls.clear();
        self.flash = Flash::default();
        self.frame = 0;
        self.player.pos = viewport.clamped().center();
        self.player.radius = self.tuning.player_radius;
    }

    /// Player's current color
    #[inline]
    pub fn player_color(&self) -> Color {
        color_of(&self.player)
    }

    pub fn apply_command(&mut self, command: Command) {
        self.player.cycle(command);
    }
}
