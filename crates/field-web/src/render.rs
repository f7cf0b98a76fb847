//! Canvas 2D drawing of the scene geometry, particles and text.

use field_core::hud::{hud_lines, start_screen_lines, HudSnapshot, PAUSED_LINE};
use field_core::scene::{self, Ellipse, Polyline, Rgba};
use field_core::{
    FieldController, FrameSnapshot, ParticleSprite, Phase, BACKGROUND_VEIL_ALPHA, LINK_RGB,
    PARTICLE_RGB, SIGN_LINE_1, SIGN_LINE_2, TRAIL_RGB,
};
use std::f64::consts::TAU;
use web_sys as web;

const HUD_LINE_HEIGHT: f64 = 16.0;

#[inline]
pub fn css_rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        rgb[0],
        rgb[1],
        rgb[2],
        (alpha / 255.0).clamp(0.0, 1.0)
    )
}

fn fill_color(ctx: &web::CanvasRenderingContext2d, c: Rgba) {
    ctx.set_fill_style_str(&css_rgba(c.rgb, c.alpha));
}

fn stroke_polyline(ctx: &web::CanvasRenderingContext2d, line: &Polyline) {
    let Some((first, rest)) = line.points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(&css_rgba(line.color.rgb, line.color.alpha));
    ctx.set_line_width(line.width as f64);
    ctx.begin_path();
    ctx.move_to(first.x as f64, first.y as f64);
    for p in rest {
        ctx.line_to(p.x as f64, p.y as f64);
    }
    ctx.stroke();
}

fn fill_ellipses(ctx: &web::CanvasRenderingContext2d, ellipses: &[Ellipse]) {
    for e in ellipses {
        fill_color(ctx, e.color);
        ctx.begin_path();
        let _ = ctx.ellipse(
            e.center.x as f64,
            e.center.y as f64,
            (e.size.x / 2.0) as f64,
            (e.size.y / 2.0) as f64,
            0.0,
            0.0,
            TAU,
        );
        ctx.fill();
    }
}

fn additive(ctx: &web::CanvasRenderingContext2d, draw: impl FnOnce()) {
    let _ = ctx.set_global_composite_operation("lighter");
    draw();
    let _ = ctx.set_global_composite_operation("source-over");
}

fn draw_particles(ctx: &web::CanvasRenderingContext2d, sprites: &[ParticleSprite]) {
    ctx.set_line_width(1.0);
    for s in sprites {
        let (x, y) = (s.position.x as f64, s.position.y as f64);
        ctx.set_fill_style_str(&css_rgba(PARTICLE_RGB, s.alpha));
        ctx.begin_path();
        let _ = ctx.arc(x, y, (s.size / 2.0) as f64, 0.0, TAU);
        ctx.fill();

        for (seg, rgb) in [(s.trail, TRAIL_RGB), (s.link, LINK_RGB)] {
            if let Some(seg) = seg {
                ctx.set_stroke_style_str(&css_rgba(rgb, seg.alpha));
                ctx.begin_path();
                ctx.move_to(x, y);
                ctx.line_to(seg.to.x as f64, seg.to.y as f64);
                ctx.stroke();
            }
        }
    }
}

fn draw_start_screen(ctx: &web::CanvasRenderingContext2d, w: f64, h: f64, has_geo: bool) {
    ctx.set_fill_style_str("rgb(0,0,0)");
    ctx.fill_rect(0.0, 0.0, w, h);
    let [title, prompt, geo, legend] = start_screen_lines(has_geo);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("rgb(255,255,255)");
    ctx.set_font("18px sans-serif");
    let _ = ctx.fill_text(title, w / 2.0, h / 2.0 - 28.0);
    ctx.set_fill_style_str("rgb(190,190,190)");
    ctx.set_font("13px sans-serif");
    for (i, line) in [prompt, geo, legend].into_iter().enumerate() {
        let _ = ctx.fill_text(line, w / 2.0, h / 2.0 + 18.0 + i as f64 * 16.0);
    }
}

fn draw_paused(ctx: &web::CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("rgb(255,255,255)");
    ctx.set_font("18px sans-serif");
    let _ = ctx.fill_text(PAUSED_LINE, w / 2.0, h / 2.0);
}

fn draw_hud(ctx: &web::CanvasRenderingContext2d, lines: &[String]) {
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(&css_rgba([255, 255, 255], 140.0));
    ctx.set_font("12px sans-serif");
    for (i, line) in lines.iter().enumerate() {
        let _ = ctx.fill_text(line, 16.0, 16.0 + i as f64 * HUD_LINE_HEIGHT);
    }
}

fn draw_signature(ctx: &web::CanvasRenderingContext2d, w: f64, h: f64, frame: u64) {
    let alpha = scene::signature_alpha(frame);
    ctx.set_text_align("right");
    ctx.set_text_baseline("bottom");
    ctx.set_font("11px sans-serif");
    ctx.set_fill_style_str(&css_rgba([255, 255, 255], alpha));
    let _ = ctx.fill_text(SIGN_LINE_1, w - 14.0, h - 28.0);
    ctx.set_fill_style_str(&css_rgba([200, 200, 200], alpha * 0.75));
    let _ = ctx.fill_text(SIGN_LINE_2, w - 14.0, h - 14.0);
}

pub fn draw_frame(
    ctx: &web::CanvasRenderingContext2d,
    controller: &FieldController,
    snap: &FrameSnapshot,
    audio_state: &str,
    frame: u64,
) {
    let size = controller.viewport();
    let (w, h) = (size.x, size.y);
    let (wd, hd) = (w as f64, h as f64);

    ctx.set_fill_style_str(&css_rgba([0, 0, 0], BACKGROUND_VEIL_ALPHA));
    ctx.fill_rect(0.0, 0.0, wd, hd);

    match snap.phase {
        Phase::Idle => {
            draw_start_screen(ctx, wd, hd, controller.territory().has_geolocation);
            draw_signature(ctx, wd, hd, frame);
            return;
        }
        Phase::Paused => {
            draw_paused(ctx, wd, hd);
            draw_signature(ctx, wd, hd, frame);
            return;
        }
        Phase::Running => {}
    }

    let (breath, coh) = (snap.breath, snap.cohesion);
    for arc in scene::mandible_arcs(w, h, breath, coh).iter() {
        stroke_polyline(ctx, arc);
    }
    additive(ctx, || {
        let hum = controller.territory().humidity_norm();
        fill_ellipses(ctx, &scene::gingival_mist(w, h, breath, coh, hum));
        if controller.chemistry_visible() {
            fill_ellipses(
                ctx,
                &scene::chemistry_light(w, h, breath, coh, controller.chemistry()),
            );
        }
    });

    draw_particles(ctx, controller.sprites());

    if snap.complete {
        additive(ctx, || fill_ellipses(ctx, &scene::completion_glow(w, h)));
    }

    let hud = HudSnapshot {
        audio_state,
        seconds_left: snap.seconds_left,
        cohesion: coh,
        intensity: controller.intensity(),
        motion_mode: controller.variant().motion_mode,
        territory: controller.territory(),
        chemistry: controller.chemistry(),
        chemistry_visible: controller.chemistry_visible(),
    };
    draw_hud(ctx, &hud_lines(&hud));
    draw_signature(ctx, wd, hd, frame);
}
