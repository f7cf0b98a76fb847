//! The particle field: independent agents drifting on a noise flow field and
//! drawn towards the mandible locus as cohesion rises.

use crate::chemistry::ChemistryState;
use crate::constants::*;
use crate::mapping::lerp;
use crate::variant::{MotionMode, VariantParameters};
use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::prelude::*;
use std::collections::VecDeque;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub phase_seed: f32,
    pub life: f32,
}

impl Particle {
    fn spawn(rng: &mut StdRng, bounds: Vec2) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        let velocity = random_unit(rng) * rng.gen_range(0.2..1.2);
        Self {
            position,
            velocity,
            phase_seed: rng.gen::<f32>() * 1000.0,
            life: rng.gen_range(0.4..1.0),
        }
    }
}

/// Inputs to a field step that come from outside the field.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub variant: &'a VariantParameters,
    pub drift_multiplier: f32,
    pub energy: f32,
}

/// A short line drawn from a particle along its velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub to: Vec2,
    pub alpha: f32,
}

/// What the renderer draws for one particle this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSprite {
    pub position: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub trail: Option<Segment>,
    pub link: Option<Segment>,
}

pub struct ParticleField {
    particles: VecDeque<Particle>,
    bounds: Vec2,
    rng: StdRng,
    noise: Perlin,
    variant_seed: u32,
    frame: u64,
}

impl ParticleField {
    pub fn new(bounds: Vec2, count: usize, seed: u32) -> Self {
        let mut field = Self {
            particles: VecDeque::new(),
            bounds,
            rng: StdRng::seed_from_u64(seed as u64),
            noise: Perlin::new(seed),
            variant_seed: seed,
            frame: 0,
        };
        field.reinitialize(count, seed);
        field
    }

    /// Rebuild the whole population, reseeding the RNG and the flow noise.
    pub fn reinitialize(&mut self, count: usize, seed: u32) {
        self.rng = StdRng::seed_from_u64(seed as u64);
        self.noise = Perlin::new(seed);
        self.variant_seed = seed;
        let count = clamp_count(count);
        self.particles.clear();
        for _ in 0..count {
            self.particles.push_back(Particle::spawn(&mut self.rng, self.bounds));
        }
        log::debug!("[field] reinitialized count={} seed={}", count, seed);
    }

    /// Move one batch towards `target`: append new particles or drop the oldest.
    pub fn resize(&mut self, target: usize) -> usize {
        let target = clamp_count(target);
        let len = self.particles.len();
        if len < target {
            let add = RESIZE_BATCH.min(target - len);
            for _ in 0..add {
                self.particles.push_back(Particle::spawn(&mut self.rng, self.bounds));
            }
        } else if len > target {
            let remove = RESIZE_BATCH.min(len - target);
            self.particles.drain(..remove);
        }
        self.particles.len()
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn step(&mut self, locus: Vec2, breath: f32, cohesion: f32, ctx: &StepContext) {
        self.frame += 1;
        let variant = ctx.variant;
        let z_base = self.variant_seed as f64 * 1e-6 + self.frame as f64 * NOISE_TIME_STEP;
        let shaping = FlowShaping {
            mode: variant.motion_mode,
            swirl_rotation: Vec2::from_angle(variant.swirl * SWIRL_ROTATION),
            burst_gain: lerp(0.6, 1.35, breath),
        };
        let flow_gain = FLOW_GAIN * ctx.drift_multiplier;
        let ceiling = SPEED_CEILING * lerp(0.7, 1.2, breath) * lerp(0.9, 1.15, ctx.energy);

        for p in self.particles.iter_mut() {
            let n = sample_flow(
                &self.noise,
                p.position,
                variant.flow_scale,
                p.phase_seed as f64 + z_base,
            );
            let mut flow = shaping.direction(n * TAU * 2.0);
            flow += random_unit(&mut self.rng) * (variant.jitter * JITTER_SCALE);
            flow *= flow_gain;

            let to_locus = locus - p.position;
            let distance = to_locus.length();
            let strength =
                order_strength(variant.motion_mode, cohesion, distance, variant.snap_to_locus);
            let order = to_locus.normalize_or_zero() * strength;

            let accel = flow.lerp(order, cohesion);
            p.velocity = (p.velocity + accel).clamp_length_max(ceiling);
            p.position = wrap_position(p.position + p.velocity, self.bounds);
        }
    }

    /// Fill `out` with this frame's sprites.
    pub fn sprites(
        &mut self,
        cohesion: f32,
        chemistry: &ChemistryState,
        chemistry_visible: bool,
        out: &mut Vec<ParticleSprite>,
    ) {
        out.clear();
        let base_alpha = lerp(16.0, 82.0, cohesion);
        let base_size = lerp(1.1, 2.7, cohesion);
        let trail_period = (lerp(26.0, 10.0, cohesion) as u64).max(1);
        let draw_trails = cohesion > TRAIL_COHESION_MIN && self.frame % trail_period == 0;
        let links_on = chemistry_visible && cohesion > LINK_COHESION_MIN;
        let link_chance = chemistry.link_chance();
        let link_length = 10.0 + 8.0 * chemistry.energy;
        let link_alpha = 18.0 + 45.0 * cohesion;

        for p in self.particles.iter() {
            let alpha = base_alpha * p.life;
            let trail = draw_trails.then(|| Segment {
                to: p.position + p.velocity * TRAIL_LENGTH,
                alpha: alpha * 0.55,
            });
            let link = (links_on && self.rng.gen::<f32>() < link_chance).then(|| Segment {
                to: p.position + p.velocity * link_length,
                alpha: link_alpha,
            });
            out.push(ParticleSprite {
                position: p.position,
                size: base_size * p.life,
                alpha,
                trail,
                link,
            });
        }
    }
}

struct FlowShaping {
    mode: MotionMode,
    swirl_rotation: Vec2,
    burst_gain: f32,
}

impl FlowShaping {
    fn direction(&self, angle: f32) -> Vec2 {
        match self.mode {
            MotionMode::Lattice => Vec2::from_angle(quantize_angle(angle)),
            MotionMode::Laminar => Vec2::from_angle(angle),
            MotionMode::Swirl => self.swirl_rotation.rotate(Vec2::from_angle(angle)),
            MotionMode::Burst => Vec2::from_angle(angle) * self.burst_gain,
        }
    }
}

/// Snap an angle to the nearest of the eight lattice directions.
pub fn quantize_angle(angle: f32) -> f32 {
    let q = ((angle / TAU) * LATTICE_DIRECTIONS).round() / LATTICE_DIRECTIONS;
    q * TAU
}

/// Pull towards the locus: falls off with distance (floored), grows with cohesion.
pub fn order_strength(mode: MotionMode, cohesion: f32, distance: f32, snap: f32) -> f32 {
    let d = distance.max(ORDER_MIN_DISTANCE);
    let base = (ORDER_BASE + ORDER_COHESION_GAIN * cohesion) * (ORDER_REFERENCE_DISTANCE / d) * snap;
    match mode {
        MotionMode::Lattice => base * LATTICE_ORDER_BOOST,
        MotionMode::Burst => base * BURST_ORDER_DAMP,
        MotionMode::Laminar | MotionMode::Swirl => base,
    }
}

/// Toroidal wrap with a margin: leaving one edge re-enters at the opposite one.
pub fn wrap_position(mut p: Vec2, bounds: Vec2) -> Vec2 {
    if p.x < -WRAP_MARGIN {
        p.x = bounds.x + WRAP_MARGIN;
    }
    if p.x > bounds.x + WRAP_MARGIN {
        p.x = -WRAP_MARGIN;
    }
    if p.y < -WRAP_MARGIN {
        p.y = bounds.y + WRAP_MARGIN;
    }
    if p.y > bounds.y + WRAP_MARGIN {
        p.y = -WRAP_MARGIN;
    }
    p
}

fn clamp_count(count: usize) -> usize {
    count.clamp(MIN_PARTICLES, MAX_PARTICLES)
}

fn sample_flow(noise: &Perlin, pos: Vec2, scale: f32, z: f64) -> f32 {
    let scale = scale as f64;
    let v = noise.get([pos.x as f64 * scale, pos.y as f64 * scale, z]);
    ((v * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
}

fn random_unit(rng: &mut StdRng) -> Vec2 {
    Vec2::from_angle(rng.gen::<f32>() * TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantized_angles_land_on_eighths() {
        for i in 0..200 {
            let a = i as f32 * 0.07;
            let q = quantize_angle(a) / (TAU / 8.0);
            assert!((q - q.round()).abs() < 1e-4, "angle {a} quantized off-grid");
        }
    }

    #[test]
    fn flow_sample_stays_in_unit_range() {
        let noise = Perlin::new(7);
        for i in 0..500 {
            let pos = Vec2::new(i as f32 * 13.0, i as f32 * 7.0);
            let n = sample_flow(&noise, pos, 0.0025, i as f64 * 0.01);
            assert!((0.0..=1.0).contains(&n));
        }
    }
}
