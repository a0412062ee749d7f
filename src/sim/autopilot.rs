//! Demo/idle mode: plays the game by matching the most urgent ball
//!
//! The most urgent ball is the one with the fewest frames left before it
//! reaches the player. The autopilot emits one cycle command per frame in the
//! shortest direction toward that ball's color.

use super::color::{Command, shortest_steps};
use super::state::{Ball, GameState};

/// Frames until `ball` touches a player at `state.player`, assuming straight-line homing
fn frames_to_contact(ball: &Ball, state: &GameState) -> f32 {
    let gap = ball.pos.distance(state.player.pos) - ball.radius - state.player.radius;
    let speed = ball.vel.length();
    if speed <= f32::EPSILON {
        return if gap < 0.0 { 0.0 } else { f32::INFINITY };
    }
    gap.max(0.0) / speed
}

/// Ball the player needs to react to first
pub fn most_urgent(state: &GameState) -> Option<&Ball> {
    state.balls.iter().min_by(|a, b| {
        frames_to_contact(a, state)
            .partial_cmp(&frames_to_contact(b, state))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Command to issue this frame, if any
pub fn choose(state: &GameState) -> Option<Command> {
    let target = most_urgent(state)?;
    match shortest_steps(state.player.color_index, target.color.index()) {
        0 => None,
        s if s > 0 => Some(Command::CycleForward),
        _ => Some(Command::CycleBackward),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::color::Color;
    use crate::sim::tick::{GameEvent, TickInput, tick};
    use glam::Vec2;

    fn state_with(balls: Vec<Ball>) -> GameState {
        let viewport = Viewport::new(800.0, 600.0);
        let mut state = GameState::new(1, viewport);
        state.start(viewport);
        state.balls = balls;
        state
    }

    fn ball(pos: Vec2, speed: f32, color: Color) -> Ball {
        let target = Vec2::new(400.0, 300.0);
        Ball {
            pos,
            vel: (target - pos).normalize() * speed,
            radius: 15.0,
            color,
        }
    }

    #[test]
    fn test_no_balls_no_command() {
        let state = state_with(Vec::new());
        assert!(most_urgent(&state).is_none());
        assert_eq!(choose(&state), None);
    }

    #[test]
    fn test_picks_soonest_arrival() {
        // Closer but slow vs farther but fast
        let slow = ball(Vec2::new(300.0, 300.0), 0.5, Color::Green);
        let fast = ball(Vec2::new(0.0, 300.0), 4.0, Color::Yellow);
        let state = state_with(vec![slow, fast]);
        assert_eq!(most_urgent(&state).map(|b| b.color), Some(Color::Yellow));
        // Red -> Yellow is one step backward
        assert_eq!(choose(&state), Some(Command::CycleBackward));
    }

    #[test]
    fn test_already_matching() {
        let state = state_with(vec![ball(Vec2::new(0.0, 300.0), 3.0, Color::Red)]);
        assert_eq!(choose(&state), None);
    }

    #[test]
    fn test_autopilot_outscores_idle_player() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut state = GameState::new(77, viewport);
        state.start(viewport);

        let mut caught = 0;
        for _ in 0..20_000 {
            let mut input = TickInput::default();
            if let Some(cmd) = choose(&state) {
                input.push(cmd);
            }
            for event in tick(&mut state, &input, 16.0, viewport) {
                if matches!(event, GameEvent::Caught { .. }) {
                    caught += 1;
                }
            }
        }
        assert!(caught >= 10, "autopilot caught only {}", caught);
    }
}
