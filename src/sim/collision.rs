//! Collision detection and outcome resolution
//!
//! Balls only ever collide with the player. Overlap is a strict circle test:
//! distance between centers below the sum of radii.

use glam::Vec2;

use super::color::Color;
use super::state::{Ball, Player, color_of};

/// Result of a ball touching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Colors matched
    Catch,
    /// Colors differed
    Miss,
}

/// Whether two circles overlap
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Whether `ball` currently touches `player`
#[inline]
pub fn ball_player_collision(ball: &Ball, player: &Player) -> bool {
    circles_overlap(ball.pos, ball.radius, player.pos, player.radius)
}

/// Outcome of `ball` hitting a player showing `player_color`
#[inline]
pub fn outcome(ball_color: Color, player_color: Color) -> Outcome {
    if ball_color == player_color {
        Outcome::Catch
    } else {
        Outcome::Miss
    }
}

/// Outcome for `ball` against `player`, or `None` when they don't touch
pub fn check(ball: &Ball, player: &Player) -> Option<Outcome> {
    ball_player_collision(ball, player).then(|| outcome(ball.color, color_of(player)))
}
