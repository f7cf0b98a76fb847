//! Motion variants chosen per activation and biased by temperature.
//!
//! Colder territories lean towards ordered motion (Lattice, Laminar), hotter
//! ones towards chaotic motion (Swirl, Burst). Each temperature band offers a
//! coin flip between two adjacent modes.

use crate::mapping::lerp;
use rand::prelude::*;

pub const SEED_LIMIT: u32 = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionMode {
    Lattice,
    Laminar,
    Swirl,
    Burst,
}

impl MotionMode {
    pub fn name(self) -> &'static str {
        match self {
            MotionMode::Lattice => "lattice",
            MotionMode::Laminar => "laminar",
            MotionMode::Swirl => "swirl",
            MotionMode::Burst => "burst",
        }
    }

    /// Mode for a normalized temperature and a uniform draw in `[0, 1)`.
    pub fn for_temperature(temperature_norm: f32, r: f32) -> Self {
        let (cold, warm) = if temperature_norm < 0.35 {
            (MotionMode::Lattice, MotionMode::Laminar)
        } else if temperature_norm < 0.7 {
            (MotionMode::Laminar, MotionMode::Swirl)
        } else {
            (MotionMode::Swirl, MotionMode::Burst)
        };
        if r < 0.5 {
            cold
        } else {
            warm
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantParameters {
    pub seed: u32,
    pub motion_mode: MotionMode,
    pub flow_scale: f32,
    pub swirl: f32,
    pub jitter: f32,
    pub snap_to_locus: f32,
}

impl Default for VariantParameters {
    fn default() -> Self {
        Self {
            seed: 1,
            motion_mode: MotionMode::Lattice,
            flow_scale: 0.002,
            swirl: 0.6,
            jitter: 0.2,
            snap_to_locus: 1.0,
        }
    }
}

impl VariantParameters {
    /// Deterministic variant for a given seed and normalized temperature.
    pub fn from_seed(seed: u32, temperature_norm: f32) -> Self {
        let t = temperature_norm.clamp(0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let r: f32 = rng.gen();
        Self {
            seed,
            motion_mode: MotionMode::for_temperature(t, r),
            flow_scale: lerp(0.0016, 0.0032, t),
            swirl: lerp(0.35, 1.10, t),
            jitter: lerp(0.08, 0.38, t),
            snap_to_locus: lerp(1.20, 0.85, t),
        }
    }
}

/// Draws fresh variant seeds from its own seed source.
pub struct VariantSelector {
    source: StdRng,
}

impl VariantSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            source: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, temperature_norm: f32) -> VariantParameters {
        let seed = self.source.gen_range(0..SEED_LIMIT);
        let variant = VariantParameters::from_seed(seed, temperature_norm);
        log::info!(
            "[variant] seed={} mode={} flow={:.4} swirl={:.2} jitter={:.2} snap={:.2}",
            variant.seed,
            variant.motion_mode.name(),
            variant.flow_scale,
            variant.swirl,
            variant.jitter,
            variant.snap_to_locus
        );
        variant
    }
}
