//! Per-frame simulation step
//!
//! Order within a frame: queued color commands, flash decay, spawner,
//! kinematics, then collisions.

use super::collision::{self, Outcome};
use super::color::{Color, Command};
use super::spawner::spawn_ball;
use super::state::{Ball, FlashKind, GamePhase, GameState};
use crate::Viewport;

/// Input gathered between frames. Outside Playing no frames run, so player
/// commands go through `Session::command` instead.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Color-cycle commands in arrival order
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BallSpawned { color: Color },
    /// Matching ball caught; `score` is the new total
    Caught { color: Color, score: u64 },
    /// Mismatched ball hit; `lives` is what remains
    LifeLost { color: Color, lives: u8 },
    GameOver { score: u64 },
}

/// Move every ball by its velocity, scaled by `scale` (1.0 for per-frame motion)
pub fn advance(balls: &mut [Ball], scale: f32) {
    for ball in balls {
        ball.pos += ball.vel * scale;
    }
}

/// Advance the game by one frame of `elapsed_ms`.
///
/// A no-op unless the game is [`GamePhase::Playing`].
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    elapsed_ms: f32,
    viewport: Viewport,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    for &command in &input.commands {
        state.apply_command(command);
    }

    state.frame += 1;
    state.flash.decay(state.tuning.flash_decay);

    if state.spawn.advance(elapsed_ms, &state.tuning) {
        let ball = spawn_ball(&mut state.rng, viewport, state.player.pos, &state.tuning);
        log::debug!(
            "Spawned {:?} ball at ({:.0}, {:.0}), next interval {:.0} ms",
            ball.color,
            ball.pos.x,
            ball.pos.y,
            state.spawn.interval_ms
        );
        events.push(GameEvent::BallSpawned { color: ball.color });
        state.balls.push(ball);
    }

    let scale = state.tuning.motion.step_scale(elapsed_ms);
    advance(&mut state.balls, scale);

    resolve_collisions(state, &mut events);

    events
}

/// Remove every ball touching the player and apply its outcome.
///
/// Stops as soon as the game ends so the GameOver transition happens once.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.balls.len() {
        if state.phase != GamePhase::Playing {
            break;
        }
        let Some(result) = collision::check(&state.balls[i], &state.player) else {
            i += 1;
            continue;
        };

        let ball = state.balls.swap_remove(i);
        match result {
            Outcome::Catch => {
                state.score += 1;
                state.flash.trigger(FlashKind::Success, state.tuning.flash_start);
                events.push(GameEvent::Caught {
                    color: ball.color,
                    score: state.score,
                });
            }
            Outcome::Miss => {
                state.lives = state.lives.saturating_sub(1);
                state.flash.trigger(FlashKind::Failure, state.tuning.flash_start);
                events.push(GameEvent::LifeLost {
                    color: ball.color,
                    lives: state.lives,
                });
                if state.lives == 0 {
                    state.phase = GamePhase::GameOver;
                    log::info!("Game over with score {}", state.score);
                    events.push(GameEvent::GameOver { score: state.score });
                }
            }
        }
    }
}
