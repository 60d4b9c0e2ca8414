//! Entity sprites, vector-drawn
//!
//! Simple layered shapes per entity. Defeated skunks get a short exit
//! animation (bounce in place for earthquake victims, fly off for tsunami).

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::{DEFEAT_ANIM_TICKS, PLAYER_SIZE, SKUNK_SIZE};
use crate::sim::{DefeatState, Flag, Player, PowerUp, Skunk, Wave};

pub fn draw_player(
    ctx: &CanvasRenderingContext2d,
    player: &Player,
    camera_x: f32,
    powerup_glow: bool,
) {
    let x = (player.pos.x - camera_x) as f64;
    let y = player.pos.y as f64;
    let size = PLAYER_SIZE as f64;

    ctx.save();

    // Held power-up shows as a colored outline
    if powerup_glow {
        if let Some(kind) = player.power_up {
            ctx.set_stroke_style_str(kind.css_color());
            ctx.set_line_width(3.0);
            ctx.stroke_rect(x - 3.0, y - 3.0, size + 6.0, size + 6.0);
        }
    }

    // Striped tail behind the body
    ctx.set_fill_style_str("#808080");
    ctx.begin_path();
    ctx.ellipse(x - 8.0, y + 24.0, 10.0, 6.0, -0.4, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_fill_style_str("#2F2F2F");
    ctx.begin_path();
    ctx.ellipse(x - 11.0, y + 22.0, 4.0, 5.0, -0.4, 0.0, TAU).ok();
    ctx.fill();

    // Body
    ctx.set_fill_style_str("#808080");
    ctx.fill_rect(x + 4.0, y + 14.0, size - 8.0, size - 16.0);

    // Head
    ctx.set_fill_style_str("#A9A9A9");
    ctx.begin_path();
    ctx.arc(x + size / 2.0, y + 10.0, 11.0, 0.0, TAU).ok();
    ctx.fill();

    // Ears
    ctx.set_fill_style_str("#696969");
    ctx.begin_path();
    ctx.arc(x + 12.0, y + 2.0, 4.0, 0.0, TAU).ok();
    ctx.arc(x + 28.0, y + 2.0, 4.0, 0.0, TAU).ok();
    ctx.fill();

    // Bandit mask
    ctx.set_fill_style_str("#2F2F2F");
    ctx.fill_rect(x + 9.0, y + 6.0, 22.0, 7.0);

    // Eyes
    ctx.set_fill_style_str("#FFF");
    ctx.begin_path();
    ctx.arc(x + 14.0, y + 9.0, 2.5, 0.0, TAU).ok();
    ctx.arc(x + 26.0, y + 9.0, 2.5, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_fill_style_str("#000");
    ctx.begin_path();
    ctx.arc(x + 14.0, y + 9.0, 1.2, 0.0, TAU).ok();
    ctx.arc(x + 26.0, y + 9.0, 1.2, 0.0, TAU).ok();
    ctx.fill();

    // Snout
    ctx.set_fill_style_str("#F5DEB3");
    ctx.begin_path();
    ctx.ellipse(x + size / 2.0, y + 15.0, 5.0, 4.0, 0.0, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_fill_style_str("#000");
    ctx.begin_path();
    ctx.arc(x + size / 2.0, y + 14.0, 1.5, 0.0, TAU).ok();
    ctx.fill();

    ctx.restore();
}

pub fn draw_skunk(ctx: &CanvasRenderingContext2d, skunk: &Skunk, camera_x: f32) {
    let (dx, dy, alpha) = match skunk.defeat {
        DefeatState::Alive => (0.0, 0.0, 1.0),
        // Removed before drawing, but harmless to handle
        DefeatState::Stomped => return,
        DefeatState::Shaken { ticks } => {
            let bounce = (ticks as f64 * 0.5).sin() * 10.0;
            (0.0, -bounce.abs(), fade(ticks))
        }
        DefeatState::Swept { ticks } => {
            (ticks as f64 * 5.0, -(ticks as f64) * 2.0, fade(ticks))
        }
    };

    let x = (skunk.rect.x - camera_x) as f64 + dx;
    let y = skunk.rect.y as f64 + dy;
    let size = SKUNK_SIZE as f64;

    ctx.save();
    ctx.set_global_alpha(alpha);

    // Bushy tail
    ctx.set_fill_style_str("#1A1A1A");
    ctx.begin_path();
    ctx.ellipse(x + size - 4.0, y + 6.0, 9.0, 13.0, 0.5, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_fill_style_str("#FFFFFF");
    ctx.begin_path();
    ctx.ellipse(x + size - 4.0, y + 4.0, 4.0, 9.0, 0.5, 0.0, TAU).ok();
    ctx.fill();

    // Body
    ctx.set_fill_style_str("#2A2A2A");
    ctx.fill_rect(x + 2.0, y + 12.0, size - 8.0, size - 14.0);

    // White stripe along the back
    ctx.set_fill_style_str("#FFFFFF");
    ctx.fill_rect(x + 2.0, y + 12.0, size - 8.0, 5.0);

    // Head
    ctx.set_fill_style_str("#1A1A1A");
    ctx.begin_path();
    ctx.arc(x + 8.0, y + 16.0, 8.0, 0.0, TAU).ok();
    ctx.fill();

    // Eye and nose
    ctx.set_fill_style_str("#FFF");
    ctx.begin_path();
    ctx.arc(x + 5.0, y + 13.0, 2.0, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_fill_style_str("#FFB6C1");
    ctx.begin_path();
    ctx.arc(x + 1.0, y + 17.0, 1.5, 0.0, TAU).ok();
    ctx.fill();

    ctx.restore();
}

fn fade(ticks: u32) -> f64 {
    (1.0 - ticks as f64 / DEFEAT_ANIM_TICKS as f64).max(0.0)
}

pub fn draw_power_up(ctx: &CanvasRenderingContext2d, power_up: &PowerUp, camera_x: f32) {
    let x = (power_up.rect.x - camera_x) as f64;
    let y = power_up.rect.y as f64;

    ctx.save();
    ctx.set_fill_style_str(power_up.kind.css_color());
    ctx.fill_rect(x, y, power_up.rect.w as f64, power_up.rect.h as f64);

    ctx.set_fill_style_str("#FFF");
    ctx.set_font("20px Arial");
    ctx.fill_text(power_up.kind.glyph(), x + 8.0, y + 22.0).ok();
    ctx.restore();
}

pub fn draw_flag(ctx: &CanvasRenderingContext2d, flag: &Flag, camera_x: f32, now_ms: f64) {
    let x = (flag.pos.x - camera_x) as f64;
    let pole_y = flag.pos.y as f64;

    // Pole
    ctx.set_fill_style_str("#8B4513");
    ctx.fill_rect(x + 25.0, pole_y, 6.0, 160.0);

    // Base
    ctx.set_fill_style_str("#654321");
    ctx.begin_path();
    ctx.ellipse(x + 28.0, pole_y + 160.0, 15.0, 5.0, 0.0, 0.0, TAU).ok();
    ctx.fill();

    // Gold finial
    ctx.set_fill_style_str("#FFD700");
    ctx.begin_path();
    ctx.arc(x + 28.0, pole_y, 4.0, 0.0, TAU).ok();
    ctx.fill();

    // The flag itself only appears once touched, rising up the pole
    if !flag.touched {
        return;
    }
    let base_y = pole_y + 140.0;
    let flag_y = base_y - flag.raise_fraction() as f64 * 130.0;
    let wave = now_ms * 0.006;

    ctx.set_fill_style_str("#87CEEB");
    ctx.begin_path();
    let mut i = 0.0;
    while i <= 80.0 {
        let wx = x + 31.0 + i;
        let wy = flag_y + (wave + i * 0.1).sin() * 2.0;
        if i == 0.0 {
            ctx.move_to(wx, wy);
        } else {
            ctx.line_to(wx, wy);
        }
        i += 3.0;
    }
    ctx.line_to(x + 111.0, flag_y + 30.0);
    let mut i = 80.0;
    while i >= 0.0 {
        let wx = x + 31.0 + i;
        let wy = flag_y + 30.0 + (wave + i * 0.1 + std::f64::consts::PI).sin() * 2.0;
        ctx.line_to(wx, wy);
        i -= 3.0;
    }
    ctx.close_path();
    ctx.fill();
}

pub fn draw_wave(ctx: &CanvasRenderingContext2d, wave: &Wave, camera_x: f32) {
    let x = (wave.rect.x - camera_x) as f64;
    let y = wave.rect.y as f64;
    let w = wave.rect.w as f64;
    let h = wave.rect.h as f64;

    ctx.save();
    ctx.set_fill_style_str("rgba(0, 100, 255, 0.6)");
    ctx.fill_rect(x, y - h / 2.0, w, h);

    // Foam flecks riding the wave
    for j in 0..3 {
        let off_x = j as f64 * 10.0 - 10.0;
        let off_y = ((wave.lifetime as f64 + j as f64 * 10.0) * 0.3).sin() * 5.0;
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.4)");
        ctx.fill_rect(x + off_x, y - h / 2.0 + off_y, 5.0, 5.0);
    }
    ctx.restore();
}
