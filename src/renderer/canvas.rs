//! Canvas 2D renderer

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{FrameSnapshot, Renderer};
use crate::sim::color_of;

const BACKGROUND: &str = "#222";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn circle(&self, x: f32, y: f32, r: f32, fill: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        if let Some(overlay) = frame.overlay {
            self.ctx.set_fill_style_str(overlay.kind.css());
            self.ctx.set_global_alpha(overlay.alpha as f64);
            self.ctx.fill_rect(0.0, 0.0, w, h);
            self.ctx.set_global_alpha(1.0);
        }

        let player = frame.player;
        self.circle(player.pos.x, player.pos.y, player.radius, color_of(player).css());

        for ball in frame.balls {
            self.circle(ball.pos.x, ball.pos.y, ball.radius, ball.color.css());
        }
    }
}
