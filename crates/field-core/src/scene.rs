//! Visual-side geometry shared with the web frontend.
//!
//! These functions avoid any drawing API: they describe shapes in canvas
//! pixel space and the renderer strokes or fills them. Alphas use the
//! `0..=255` scale.

use crate::chemistry::ChemistryState;
use crate::constants::*;
use crate::mapping::lerp;
use glam::Vec2;
use std::f32::consts::PI;

const ARC_STEP: f32 = 0.03;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Rgba {
    pub fn new(rgb: [u8; 3], alpha: f32) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 255.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec2>,
    pub color: Rgba,
    pub width: f32,
}

/// Axis-aligned ellipse; `size` holds the full width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

/// Point the particles are drawn towards; rises and falls with the breath.
pub fn locus(width: f32, height: f32, breath: f32) -> Vec2 {
    Vec2::new(width / 2.0, lerp(height * 0.62, height * 0.58, breath))
}

fn arc_points(center: Vec2, radii: Vec2, from: f32, to: f32) -> Vec<Vec2> {
    let steps = ((to - from) / ARC_STEP).floor() as usize;
    (0..=steps)
        .map(|i| {
            let ang = from + i as f32 * ARC_STEP;
            center + Vec2::new(ang.cos() * radii.x, ang.sin() * radii.y)
        })
        .collect()
}

/// Outer and inner jaw arcs.
pub fn mandible_arcs(width: f32, height: f32, breath: f32, cohesion: f32) -> [Polyline; 2] {
    let center = Vec2::new(width / 2.0, height * 0.68);
    let radii = Vec2::new(
        lerp(width * 0.42, width * 0.50, breath),
        lerp(height * 0.18, height * 0.23, breath),
    );
    let alpha = lerp(25.0, 95.0, cohesion);
    let outer = Polyline {
        points: arc_points(center, radii, PI * 0.1, PI * 0.9),
        color: Rgba::new(ARC_OUTER_RGB, alpha),
        width: 2.0,
    };
    let inner = Polyline {
        points: arc_points(center - Vec2::new(0.0, 14.0), radii * 0.82, PI * 0.12, PI * 0.88),
        color: Rgba::new(ARC_INNER_RGB, alpha * 0.65),
        width: 1.5,
    };
    [outer, inner]
}

/// Six widening additive haze layers above the arc.
pub fn gingival_mist(
    width: f32,
    height: f32,
    breath: f32,
    cohesion: f32,
    humidity_norm: f32,
) -> Vec<Ellipse> {
    let alpha = lerp(6.0, 22.0, cohesion) * lerp(0.8, 1.1, humidity_norm);
    let center = Vec2::new(width / 2.0, lerp(height * 0.56, height * 0.54, breath));
    (0..6)
        .map(|i| Ellipse {
            center,
            size: Vec2::new(width * 0.30 + i as f32 * 80.0, height * 0.10 + i as f32 * 35.0),
            color: Rgba::new(MIST_RGB, alpha),
        })
        .collect()
}

/// Additive glow expressing hydration and stress.
pub fn chemistry_light(
    width: f32,
    height: f32,
    breath: f32,
    cohesion: f32,
    chemistry: &ChemistryState,
) -> [Ellipse; 2] {
    let glow = chemistry.glow(cohesion);
    let pulse = lerp(0.75, 1.15, breath);
    [
        Ellipse {
            center: Vec2::new(width * 0.5, height * 0.55),
            size: Vec2::new(width * 0.9, height * 0.55),
            color: Rgba::new(CHEM_GLOW_A_RGB, 10.0 + 40.0 * glow * pulse),
        },
        Ellipse {
            center: Vec2::new(width * 0.5, height * 0.68),
            size: Vec2::new(width * 0.75, height * 0.40),
            color: Rgba::new(CHEM_GLOW_B_RGB, 8.0 + 30.0 * glow),
        },
    ]
}

/// Rings shown once the session has run its full length.
pub fn completion_glow(width: f32, height: f32) -> Vec<Ellipse> {
    let center = Vec2::new(width / 2.0, height * 0.62);
    (0..5)
        .map(|i| {
            let w = 180.0 + i as f32 * 80.0;
            Ellipse {
                center,
                size: Vec2::new(w, w * 0.55),
                color: Rgba::new(COMPLETION_RGB, 12.0),
            }
        })
        .collect()
}

pub fn signature_alpha(frame: u64) -> f32 {
    115.0 + 35.0 * (frame as f32 * 0.01).sin()
}
