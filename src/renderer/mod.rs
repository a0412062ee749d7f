//! Rendering seam
//!
//! The simulation hands the renderer a borrowed [`FrameSnapshot`] once per
//! frame, after the update. Renderers never mutate game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::settings::Settings;
use crate::sim::{Ball, FlashKind, GamePhase, GameState, Player};

/// Full-screen flash overlay for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub kind: FlashKind,
    /// 0..=1
    pub alpha: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub player: &'a Player,
    pub balls: &'a [Ball],
    pub overlay: Option<Overlay>,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
}

impl<'a> FrameSnapshot<'a> {
    pub fn new(state: &'a GameState, settings: &Settings) -> Self {
        let overlay = state.flash.kind.and_then(|kind| {
            let alpha = state.flash.opacity(state.tuning.flash_start) * settings.flash_intensity();
            (alpha > 0.0).then_some(Overlay { kind, alpha })
        });
        Self {
            player: &state.player,
            balls: &state.balls,
            overlay,
            score: state.score,
            lives: state.lives,
            phase: state.phase,
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>);
}
