//! Canvas2D renderer
//!
//! Draws one frame from the simulation state and the active palette. Pure
//! with respect to game state: nothing here mutates the session.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::BALL_RADIUS;
use crate::settings::GameSettings;
use crate::sim::{Frame, GameState};

const GRID_SIZE: f64 = 40.0;

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw the full frame: background, grid, net, paddles, trail, ball.
    pub fn draw(&self, state: &GameState, settings: &GameSettings, frame: &Frame) {
        let palette = settings.theme.palette();
        let width = frame.width() as f64;
        let height = frame.height() as f64;
        let ctx = &self.ctx;

        ctx.set_fill_style_str(palette.background);
        ctx.fill_rect(0.0, 0.0, width, height);

        self.draw_grid(width, height, palette.dim);
        self.draw_net(width, height, frame, palette.accent);

        // Phosphor glow on the entities when scanlines are on
        if settings.crt_effect {
            ctx.set_shadow_blur(10.0);
            ctx.set_shadow_color(palette.foreground);
        }
        ctx.set_fill_style_str(palette.foreground);

        for paddle in [&state.player, &state.ai] {
            ctx.fill_rect(
                paddle.pos.x as f64,
                paddle.pos.y as f64,
                paddle.size.x as f64,
                paddle.size.y as f64,
            );
        }

        self.draw_trail(state);

        let r = state.ball.radius as f64;
        ctx.fill_rect(
            state.ball.pos.x as f64 - r,
            state.ball.pos.y as f64 - r,
            r * 2.0,
            r * 2.0,
        );

        ctx.set_shadow_blur(0.0);
    }

    fn draw_grid(&self, width: f64, height: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        let mut x = 0.0;
        while x <= width {
            ctx.move_to(x, 0.0);
            ctx.line_to(x, height);
            x += GRID_SIZE;
        }
        let mut y = 0.0;
        while y <= height {
            ctx.move_to(0.0, y);
            ctx.line_to(width, y);
            y += GRID_SIZE;
        }
        ctx.stroke();
    }

    /// Dashed center net, perpendicular to the goal axis
    fn draw_net(&self, width: f64, height: f64, frame: &Frame, color: &str) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(2.0);
        let dashes = js_sys::Array::of2(&JsValue::from_f64(8.0), &JsValue::from_f64(12.0));
        let _ = ctx.set_line_dash(&dashes);
        ctx.begin_path();
        if frame.orientation().is_portrait() {
            ctx.move_to(0.0, height / 2.0);
            ctx.line_to(width, height / 2.0);
        } else {
            ctx.move_to(width / 2.0, 0.0);
            ctx.line_to(width / 2.0, height);
        }
        ctx.stroke();
        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }

    /// Fading squares behind the ball, oldest faintest
    fn draw_trail(&self, state: &GameState) {
        let trail = &state.ball.trail;
        if trail.is_empty() {
            return;
        }
        let ctx = &self.ctx;
        let len = trail.len() as f64;
        let r = BALL_RADIUS as f64;
        for (i, pos) in trail.iter().enumerate() {
            ctx.set_global_alpha(i as f64 / len * 0.7 + 0.1);
            ctx.fill_rect(pos.x as f64 - r, pos.y as f64 - r, r * 2.0, r * 2.0);
        }
        ctx.set_global_alpha(1.0);
    }
}
