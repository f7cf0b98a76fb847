//! Symbolic chemistry: a metaphorical reading of the territory.
//!
//! Only the glow layer, link-line probability and particle speed ceiling read
//! these values.

use crate::territory::Territory;

pub const PH_MIN: f32 = 6.2;
pub const PH_MAX: f32 = 7.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChemistryState {
    pub hydration: f32,
    pub energy: f32,
    pub stress: f32,
    pub redox: f32,
    pub ph: f32,
}

impl Default for ChemistryState {
    fn default() -> Self {
        Self {
            hydration: 0.6,
            energy: 0.5,
            stress: 0.3,
            redox: 0.5,
            ph: 7.0,
        }
    }
}

impl ChemistryState {
    pub fn derive(territory: &Territory) -> Self {
        let hum = territory.humidity_norm();
        let temp = territory.temperature_norm();
        let energy = territory.solar_norm();
        let stress = territory.wind_norm();

        let hydration = (0.65 * hum + 0.35 * (1.0 - (temp - 0.55).abs())).clamp(0.0, 1.0);
        let redox = (0.55 * energy + 0.25 * hydration - 0.35 * stress + 0.25).clamp(0.0, 1.0);
        let ph = (7.0 + (redox - 0.5) * 0.8 - (stress - 0.5) * 0.6).clamp(PH_MIN, PH_MAX);

        Self {
            hydration,
            energy,
            stress,
            redox,
            ph,
        }
    }

    /// Per-frame chance that a particle draws a link line.
    pub fn link_chance(&self) -> f32 {
        0.02 + 0.05 * self.hydration + 0.04 * self.redox
    }

    /// Strength of the chemistry light layer.
    pub fn glow(&self, cohesion: f32) -> f32 {
        (0.25 + 0.55 * self.hydration + 0.35 * cohesion) * (1.0 - 0.35 * self.stress)
    }
}
