//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Input applied between frames only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod color;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Outcome, ball_player_collision, circles_overlap};
pub use color::{Color, Command, PALETTE};
pub use spawner::{Edge, SpawnTimer, spawn_ball};
pub use state::{Ball, Flash, FlashKind, GamePhase, GameState, Player, color_of};
pub use tick::{GameEvent, TickInput, advance, tick};
