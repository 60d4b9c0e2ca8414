//! Canvas 2D renderer
//!
//! Draws the whole frame from `GameState`: themed background, platforms,
//! entities, and overlay cards. Everything is vector-drawn on the canvas,
//! no image assets.

mod background;
mod sprites;

use web_sys::CanvasRenderingContext2d;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Theme};

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw one frame. `now_ms` drives purely cosmetic animation (snowfall,
    /// flag wave); the simulation never sees it.
    pub fn draw(&self, state: &GameState, settings: &Settings, now_ms: f64, fps: Option<f64>) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

        let anim_ms = if settings.reduced_motion { 0.0 } else { now_ms };
        background::draw(ctx, state.level.theme, state.camera_x, anim_ms, settings);

        ctx.save();
        if settings.effective_screen_shake() && state.screen_shake > 0.0 {
            ctx.translate(state.shake_offset.x as f64, state.shake_offset.y as f64)
                .ok();
        }

        for platform in &state.level.platforms {
            self.draw_platform(platform, state.level.theme, state.camera_x);
        }

        sprites::draw_flag(ctx, &state.flag, state.camera_x, anim_ms);

        for power_up in &state.power_ups {
            if !power_up.collected {
                sprites::draw_power_up(ctx, power_up, state.camera_x);
            }
        }
        for skunk in &state.skunks {
            sprites::draw_skunk(ctx, skunk, state.camera_x);
        }
        for wave in &state.waves {
            sprites::draw_wave(ctx, wave, state.camera_x);
        }

        sprites::draw_player(ctx, &state.player, state.camera_x, settings.powerup_glow);

        ctx.restore();

        self.draw_overlay(state);

        if let Some(fps) = fps {
            if settings.show_fps {
                ctx.set_fill_style_str("#FFFFFF");
                ctx.set_font("12px monospace");
                ctx.fill_text(&format!("{fps:.0} fps"), 8.0, 14.0).ok();
            }
        }
    }

    fn draw_platform(&self, platform: &crate::sim::Aabb, theme: Theme, camera_x: f32) {
        let ctx = &self.ctx;
        let x = (platform.x - camera_x) as f64;
        let y = platform.y as f64;
        let w = platform.w as f64;
        let h = platform.h as f64;
        if x + w < 0.0 || x > VIEW_WIDTH as f64 {
            return;
        }

        match theme {
            Theme::Grass => {
                ctx.set_fill_style_str("#228B22");
                ctx.fill_rect(x, y, w, h);
                // Grass blades along the top
                ctx.set_fill_style_str("#32CD32");
                let mut i = 0.0;
                while i < w {
                    let blade = 3.0 + (i * 0.1).sin() * 2.0;
                    ctx.fill_rect(x + i, y - blade, 2.0, blade);
                    i += 5.0;
                }
            }
            Theme::Snow => {
                ctx.set_fill_style_str("#A9A9A9");
                ctx.fill_rect(x, y, w, h);
                ctx.set_fill_style_str("#FFFAFA");
                ctx.fill_rect(x, y - 8.0, w, 8.0);
                let mut i = 7.0;
                while i < w {
                    ctx.begin_path();
                    ctx.arc(x + i, y - 4.0, 4.0, 0.0, std::f64::consts::TAU).ok();
                    ctx.fill();
                    i += 15.0;
                }
            }
            Theme::Ice => {
                ctx.set_fill_style_str("#4682B4");
                ctx.fill_rect(x, y, w, h);
                let sheen = ctx.create_linear_gradient(0.0, y, 0.0, y + 10.0);
                sheen.add_color_stop(0.0, "rgba(173, 216, 230, 0.9)").ok();
                sheen.add_color_stop(1.0, "rgba(173, 216, 230, 0.3)").ok();
                ctx.set_fill_style_canvas_gradient(&sheen);
                ctx.fill_rect(x, y, w, 10.0);
                ctx.set_stroke_style_str("rgba(255, 255, 255, 0.5)");
                ctx.set_line_width(2.0);
                ctx.begin_path();
                ctx.move_to(x + 10.0, y + 3.0);
                ctx.line_to(x + w - 10.0, y + 3.0);
                ctx.stroke();
            }
        }
    }

    /// Full-screen cards for level transitions and end states
    fn draw_overlay(&self, state: &GameState) {
        let ctx = &self.ctx;
        let (title, subtitle) = match state.phase {
            GamePhase::Playing => return,
            GamePhase::LevelComplete { .. } => {
                let sub = format!("{} cleared - Score: {}", state.level.name, state.score);
                ("Level Complete!".to_string(), sub)
            }
            GamePhase::GameOver => (
                "Game Over!".to_string(),
                format!("Final score: {} - Press R to play again", state.score),
            ),
            GamePhase::GameComplete => (
                "You Win!".to_string(),
                format!("All levels cleared - Score: {}", state.score),
            ),
        };

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

        let cx = VIEW_WIDTH as f64 / 2.0;
        let cy = VIEW_HEIGHT as f64 / 2.0;
        ctx.set_fill_style_str("#FFF");
        ctx.set_text_align("center");
        ctx.set_font("48px Arial");
        ctx.fill_text(&title, cx, cy).ok();
        ctx.set_font("24px Arial");
        ctx.fill_text(&subtitle, cx, cy + 40.0).ok();
        ctx.set_text_align("left");
    }
}
