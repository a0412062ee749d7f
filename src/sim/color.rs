//! The four-color palette shared by the player and the balls

use serde::{Deserialize, Serialize};

/// A palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

/// Palette in cycling order
pub const PALETTE: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

impl Color {
    /// Palette color at `index`, wrapping
    #[inline]
    pub fn from_index(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }

    /// Position in [`PALETTE`]
    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
        }
    }

    /// CSS fill style
    pub fn css(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }
}

/// Direction of a color-cycle command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    CycleBackward,
    CycleForward,
}

/// Apply a cycle command to a palette index
#[inline]
pub fn cycle_index(index: usize, command: Command) -> usize {
    let n = PALETTE.len();
    match command {
        Command::CycleForward => (index + 1) % n,
        Command::CycleBackward => (index + n - 1) % n,
    }
}

/// Signed number of forward steps from `from` to `to` along the shortest way round
pub fn shortest_steps(from: usize, to: usize) -> i32 {
    let n = PALETTE.len() as i32;
    let diff = (to as i32 - from as i32).rem_euclid(n);
    if diff > n / 2 { diff - n } else { diff }
}
