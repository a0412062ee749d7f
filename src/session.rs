//! Game lifecycle around the simulation
//!
//! [`Session`] owns the [`GameState`] and the high score store. The frontend
//! calls `start`, `frame`, `restart` and `command`; the high score is written
//! at most once per game, on the Playing -> GameOver transition.

use crate::Viewport;
use crate::highscore::{self, HighScoreStore};
use crate::sim::{Command, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    pub state: GameState,
    store: S,
    /// Best score as of the last game over (or load)
    high_score: u64,
    /// Player commands waiting for the next frame
    pending: TickInput,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(seed: u64, viewport: Viewport, store: S) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default(), store)
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning, store: S) -> Self {
        let high_score = store.load();
        Self {
            state: GameState::with_tuning(seed, viewport, tuning),
            store,
            high_score,
            pending: TickInput::default(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Idle -> Playing
    pub fn start(&mut self, viewport: Viewport) -> bool {
        let started = self.state.start(viewport);
        if started {
            self.pending.clear();
        }
        started
    }

    /// GameOver -> Idle
    pub fn restart(&mut self) -> bool {
        self.state.restart()
    }

    /// Color-cycle command from the player. Queued for the next frame while
    /// playing, applied immediately otherwise (no frames run then).
    pub fn command(&mut self, command: Command) {
        if self.state.phase == GamePhase::Playing {
            self.pending.push(command);
        } else {
            self.state.apply_command(command);
        }
    }

    /// Run one frame and persist the high score if the game just ended.
    /// Queued player commands are applied ahead of `input`'s.
    pub fn frame(
        &mut self,
        input: &TickInput,
        elapsed_ms: f32,
        viewport: Viewport,
    ) -> Vec<GameEvent> {
        let events = if self.pending.commands.is_empty() {
            tick(&mut self.state, input, elapsed_ms, viewport)
        } else {
            let mut merged = std::mem::take(&mut self.pending);
            merged.commands.extend_from_slice(&input.commands);
            tick(&mut self.state, &merged, elapsed_ms, viewport)
        };
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                self.high_score = highscore::record(&mut self.store, *score);
            }
        }
        events
    }
}
