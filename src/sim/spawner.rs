//! Ball spawning
//!
//! Balls enter on a random screen edge and home toward the player's position
//! at spawn time. The spawn interval shrinks geometrically per spawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::{Color, PALETTE};
use super::state::Ball;
use crate::Viewport;
use crate::tuning::Tuning;

/// Screen edge a ball enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Point on this edge; `t` in [0, 1) runs along it
    pub fn point(&self, viewport: Viewport, t: f32) -> Vec2 {
        let Viewport { width, height } = viewport.clamped();
        match self {
            Edge::Left => Vec2::new(0.0, t * height),
            Edge::Right => Vec2::new(width, t * height),
            Edge::Top => Vec2::new(t * width, 0.0),
            Edge::Bottom => Vec2::new(t * width, height),
        }
    }
}

/// Spawn cadence: accumulated time and the current (decaying) interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval_ms: f32,
    pub since_last_ms: f32,
}

impl SpawnTimer {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            interval_ms,
            since_last_ms: 0.0,
        }
    }

    /// Accumulate `elapsed_ms`. Returns true when a spawn is due, in which case
    /// the accumulator is reset and the interval decayed.
    pub fn advance(&mut self, elapsed_ms: f32, tuning: &Tuning) -> bool {
        self.since_last_ms += elapsed_ms.max(0.0);
        if self.since_last_ms > self.interval_ms {
            self.since_last_ms = 0.0;
            self.interval_ms = next_interval(self.interval_ms, tuning);
            true
        } else {
            false
        }
    }
}

/// Interval after one more spawn
#[inline]
pub fn next_interval(interval_ms: f32, tuning: &Tuning) -> f32 {
    (interval_ms * tuning.spawn_interval_decay).max(tuning.min_spawn_interval_ms)
}

/// Velocity of magnitude `speed` from `from` toward `to`.
/// Coincident points have no direction; those head along +x.
#[inline]
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X) * speed
}

/// Create a ball on a random edge, aimed at `target`
pub fn spawn_ball<R: Rng>(
    rng: &mut R,
    viewport: Viewport,
    target: Vec2,
    tuning: &Tuning,
) -> Ball {
    let color = Color::from_index(rng.random_range(0..PALETTE.len()));
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = edge.point(viewport, rng.random::<f32>());
    let speed = rng.random_range(tuning.ball_min_speed..tuning.ball_max_speed);

    Ball {
        pos,
        vel: aim(pos, target, speed),
        radius: tuning.ball_radius,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_spawns_after_interval() {
        let tuning = Tuning::default();
        let mut timer = SpawnTimer::new(2000.0);

        assert!(!timer.advance(1000.0, &tuning));
        // Exactly equal does not exceed
        assert!(!timer.advance(1000.0, &tuning));
        assert!(timer.advance(1.0, &tuning));
        assert_eq!(timer.since_last_ms, 0.0);
        assert!((timer.interval_ms - 1960.0).abs() < 1e-3);
    }

    #[test]
    fn test_one_spawn_per_advance() {
        let tuning = Tuning::default();
        let mut timer = SpawnTimer::new(2000.0);
        // A long stall still yields a single spawn
        assert!(timer.advance(10_000.0, &tuning));
        assert!(!timer.advance(0.0, &tuning));
    }

    #[test]
    fn test_interval_decay_sequence() {
        let tuning = Tuning::default();
        let mut interval = 2000.0_f32;
        for n in 1..=50 {
            interval = next_interval(interval, &tuning);
            let expected = 2000.0 * 0.98_f64.powi(n);
            assert!(
                ((interval as f64) - expected).abs() / expected < 1e-4,
                "spawn {}: {} vs {}",
                n,
                interval,
                expected
            );
        }
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning::default();
        let mut interval = 2000.0_f32;
        for _ in 0..200 {
            interval = next_interval(interval, &tuning);
        }
        assert_eq!(interval, 500.0);
        assert_eq!(next_interval(505.0, &tuning), 500.0);
    }

    #[test]
    fn test_edge_points() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(Edge::Left.point(v, 0.5), Vec2::new(0.0, 300.0));
        assert_eq!(Edge::Right.point(v, 0.5), Vec2::new(800.0, 300.0));
        assert_eq!(Edge::Top.point(v, 0.25), Vec2::new(200.0, 0.0));
        assert_eq!(Edge::Bottom.point(v, 0.25), Vec2::new(200.0, 600.0));
    }

    #[test]
    fn test_degenerate_viewport() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let v = Viewport::new(0.0, -10.0);
        for _ in 0..32 {
            let ball = spawn_ball(&mut rng, v, v.clamped().center(), &tuning);
            assert!(ball.pos.is_finite());
            assert!(ball.vel.is_finite());
            assert!(ball.pos.x <= 1.0 && ball.pos.y <= 1.0);
        }
    }

    #[test]
    fn test_aim() {
        let v = aim(Vec2::ZERO, Vec2::new(0.0, 10.0), 3.0);
        assert!((v - Vec2::new(0.0, 3.0)).length() < 1e-6);
        assert_eq!(aim(Vec2::ONE, Vec2::ONE, 3.0), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_colors_cover_palette() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let v = Viewport::new(800.0, 600.0);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[spawn_ball(&mut rng, v, v.center(), &tuning).color.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    proptest! {
        #[test]
        fn prop_spawn_aims_at_target(seed in any::<u64>(), w in 50.0f32..3000.0, h in 50.0f32..3000.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let v = Viewport::new(w, h);
            let target = v.center();
            let ball = spawn_ball(&mut rng, v, target, &tuning);

            let speed = ball.vel.length();
            prop_assert!(speed >= 2.0 - 1e-4 && speed < 4.0 + 1e-4);

            let ideal = (target - ball.pos).normalize();
            prop_assert!((ball.vel.normalize().dot(ideal) - 1.0).abs() < 1e-4);

            let on_edge = ball.pos.x == 0.0 || ball.pos.x == w || ball.pos.y == 0.0 || ball.pos.y == h;
            prop_assert!(on_edge);
            prop_assert_eq!(ball.radius, tuning.ball_radius);
        }

        #[test]
        fn prop_interval_never_below_floor(steps in 0usize..400) {
            let tuning = Tuning::default();
            let mut interval = tuning.initial_spawn_interval_ms;
            for _ in 0..steps {
                interval = next_interval(interval, &tuning);
            }
            prop_assert!(interval >= 500.0);
            prop_assert!(interval <= 2000.0);
        }
    }
}
