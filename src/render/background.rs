//! Themed parallax backgrounds
//!
//! Each theme is a sky gradient plus a couple of scenery layers scrolling at
//! fractions of the camera speed. Scenery density comes from settings.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::settings::Settings;
use crate::sim::Theme;

pub fn draw(
    ctx: &CanvasRenderingContext2d,
    theme: Theme,
    camera_x: f32,
    now_ms: f64,
    settings: &Settings,
) {
    match theme {
        Theme::Grass => draw_grass(ctx, camera_x, settings),
        Theme::Snow => draw_snow(ctx, camera_x, now_ms, settings),
        Theme::Ice => draw_ice(ctx, camera_x, now_ms, settings),
    }
}

fn sky(ctx: &CanvasRenderingContext2d, stops: &[(f64, &str)]) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, VIEW_HEIGHT as f64);
    for &(offset, color) in stops {
        gradient.add_color_stop(offset as f32, color).ok();
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
}

/// A three-lobed cloud
fn cloud(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU).ok();
    ctx.arc(x + r * 1.25, y, r * 1.5, 0.0, TAU).ok();
    ctx.arc(x + r * 2.5, y, r, 0.0, TAU).ok();
    ctx.fill();
}

fn draw_grass(ctx: &CanvasRenderingContext2d, camera_x: f32, settings: &Settings) {
    sky(
        ctx,
        &[(0.0, "#87CEEB"), (0.7, "#98FB98"), (1.0, "#90EE90")],
    );

    let view_w = VIEW_WIDTH as f64;
    let cam = camera_x as f64;

    ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
    for i in 0..settings.scenery_count() {
        let x = (i as f64 * 200.0 + 50.0 - cam * 0.3).rem_euclid(view_w + 100.0);
        cloud(ctx, x, 50.0 + i as f64 * 10.0, 20.0);
    }

    // Flowers at ground height
    if settings.detail.far_layer_enabled() {
        let mut i = 0.0;
        while i < 3000.0 {
            let x = i - cam;
            if x > -50.0 && x < view_w + 50.0 {
                ctx.set_fill_style_str("#FFB6C1");
                ctx.begin_path();
                ctx.arc(x, 370.0, 8.0, 0.0, TAU).ok();
                ctx.fill();
                ctx.set_fill_style_str("#FFD700");
                ctx.begin_path();
                ctx.arc(x, 370.0, 3.0, 0.0, TAU).ok();
                ctx.fill();
            }
            i += 150.0;
        }
    }
}

fn draw_snow(ctx: &CanvasRenderingContext2d, camera_x: f32, now_ms: f64, settings: &Settings) {
    sky(
        ctx,
        &[(0.0, "#B0E0E6"), (0.7, "#F0F8FF"), (1.0, "#FFFFFF")],
    );

    let view_w = VIEW_WIDTH as f64;
    let view_h = VIEW_HEIGHT as f64;
    let cam = camera_x as f64;

    ctx.set_fill_style_str("rgba(200, 200, 200, 0.6)");
    for i in 0..settings.scenery_count() {
        let x = (i as f64 * 250.0 + 80.0 - cam * 0.2).rem_euclid(view_w + 120.0);
        cloud(ctx, x, 40.0 + i as f64 * 15.0, 25.0);
    }

    // Falling snow, drifting with time
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
    for i in 0..settings.scenery_count() * 6 {
        let x = (i as f64 * 47.0 + 23.0 - cam * 0.1).rem_euclid(view_w + 50.0);
        let y = (now_ms * 0.01 + i as f64 * 137.0).rem_euclid(view_h + 20.0);
        ctx.begin_path();
        ctx.arc(x, y, 2.0, 0.0, TAU).ok();
        ctx.fill();
    }

    // Snow drifts at ground height
    if settings.detail.far_layer_enabled() {
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
        let mut i = 0.0;
        while i < 3000.0 {
            let x = i - cam;
            if x > -100.0 && x < view_w + 100.0 {
                ctx.begin_path();
                ctx.ellipse(x + 50.0, 380.0, 60.0, 15.0, 0.0, 0.0, TAU).ok();
                ctx.fill();
            }
            i += 200.0;
        }
    }
}

fn draw_ice(ctx: &CanvasRenderingContext2d, camera_x: f32, now_ms: f64, settings: &Settings) {
    sky(
        ctx,
        &[
            (0.0, "#191970"),
            (0.3, "#483D8B"),
            (0.7, "#B0C4DE"),
            (1.0, "#E6F3FF"),
        ],
    );

    let view_w = VIEW_WIDTH as f64;
    let cam = camera_x as f64;

    // Aurora band drifting across the sky
    if settings.detail.far_layer_enabled() {
        ctx.save();
        ctx.set_global_alpha(0.3);
        let offset = (now_ms * 0.001).sin() * 50.0;
        let aurora = ctx.create_linear_gradient(0.0, 0.0, 0.0, 150.0);
        aurora.add_color_stop(0.0, "#00FF7F").ok();
        aurora.add_color_stop(0.5, "#00BFFF").ok();
        aurora.add_color_stop(1.0, "rgba(0, 191, 255, 0)").ok();
        ctx.set_fill_style_canvas_gradient(&aurora);
        ctx.fill_rect(offset - cam * 0.05, 0.0, view_w, 150.0);
        ctx.restore();
    }

    // Slowly spinning ice crystals
    ctx.set_fill_style_str("rgba(173, 216, 230, 0.6)");
    for i in 0..settings.scenery_count() * 4 {
        let x = (i as f64 * 73.0 + 36.0 - cam * 0.15).rem_euclid(view_w + 70.0);
        let y = 50.0 + (i as f64 * 29.0).rem_euclid(200.0);
        ctx.save();
        ctx.translate(x, y).ok();
        ctx.rotate(now_ms * 0.0001 * i as f64).ok();
        ctx.begin_path();
        for j in 0..6 {
            let angle = j as f64 / 6.0 * TAU;
            let px = angle.cos() * 3.0;
            let py = angle.sin() * 3.0;
            if j == 0 {
                ctx.move_to(px, py);
            } else {
                ctx.line_to(px, py);
            }
        }
        ctx.close_path();
        ctx.fill();
        ctx.restore();
    }
}
