//! Audio parameter engine.
//!
//! Two layers share the territory, chemistry and session state:
//! - a tone layer (sine carrier, sine sub, looping pink noise) whose
//!   frequencies and levels follow breath, cohesion and a slow wind LFO;
//! - a modulation proxy: a low carrier whose gain is swept by a 1–20 Hz
//!   sinusoid, a perceptible stand-in for infrasound ordinary speakers
//!   cannot reproduce.
//!
//! Nothing here touches an audio API. The engine emits [`AudioCommand`]s that
//! the front-end applies to its graph.

use crate::constants::*;
use crate::error::ConfigError;
use crate::mapping::{lerp, unit_sine};
use crate::territory::Territory;
use smallvec::SmallVec;
use std::f32::consts::TAU;

pub const LFO_HZ_RANGE: (f32, f32) = (1.0, 20.0);
pub const CARRIER_HZ_RANGE: (f32, f32) = (40.0, 140.0);
pub const PICKED_CARRIER_HZ_RANGE: (f32, f32) = (50.0, 110.0);
pub const DEPTH_RANGE: (f32, f32) = (0.0, 1.0);
pub const BASE_AMPLITUDE_RANGE: (f32, f32) = (0.0, 0.18);

/// Per-frame targets for the tone layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneTargets {
    pub carrier_hz: f32,
    pub sub_hz: f32,
    pub carrier_amp: f32,
    pub sub_amp: f32,
    pub noise_amp: f32,
}

/// Tone layer targets for session time `t`.
pub fn tone_targets(territory: &Territory, t: f32, breath: f32, cohesion: f32) -> ToneTargets {
    let drift = 5.0 * (TAU * 0.02 * t).sin() * lerp(0.7, 1.15, territory.solar_norm());
    let lfo = unit_sine(lerp(0.05, 0.18, territory.wind_norm()), t);

    let breath_amp = lerp(0.01, 0.06, breath) * lerp(0.65, 1.0, cohesion);
    ToneTargets {
        carrier_hz: territory.tone_base_hz + drift,
        sub_hz: territory.sub_base_hz + drift * 0.15,
        carrier_amp: breath_amp * (0.75 + 0.25 * lfo),
        sub_amp: (0.008 + 0.018 * cohesion) * (0.7 + 0.3 * lfo),
        noise_amp: territory.noise_amplitude * (0.4 + 0.6 * lfo) * (0.6 + 0.6 * cohesion),
    }
}

/// Modulation rate from wind and humidity, in `[1, 20]` Hz.
pub fn pick_lfo_hz(territory: &Territory) -> f32 {
    let hz = lerp(3.0, 14.0, territory.wind_norm()) * lerp(0.9, 1.1, territory.humidity_norm());
    hz.clamp(LFO_HZ_RANGE.0, LFO_HZ_RANGE.1)
}

/// Proxy carrier from solar irradiance, in `[50, 110]` Hz.
pub fn pick_carrier_hz(territory: &Territory) -> f32 {
    lerp(62.0, 88.0, territory.solar_norm())
        .clamp(PICKED_CARRIER_HZ_RANGE.0, PICKED_CARRIER_HZ_RANGE.1)
}

/// Recognized modulation proxy settings, clamped into range on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModulationConfig {
    pub lfo_hz: f32,
    pub carrier_hz: f32,
    pub depth: f32,
    pub base_amplitude: f32,
}

impl Default for ModulationConfig {
    fn default() -> Self {
        Self {
            lfo_hz: 8.0,
            carrier_hz: 80.0,
            depth: 0.6,
            base_amplitude: 0.06,
        }
    }
}

impl ModulationConfig {
    pub fn new(
        lfo_hz: f32,
        carrier_hz: f32,
        depth: f32,
        base_amplitude: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            lfo_hz: clamped("lfo_hz", lfo_hz, LFO_HZ_RANGE)?,
            carrier_hz: clamped("carrier_hz", carrier_hz, CARRIER_HZ_RANGE)?,
            depth: clamped("depth", depth, DEPTH_RANGE)?,
            base_amplitude: clamped("base_amplitude", base_amplitude, BASE_AMPLITUDE_RANGE)?,
        })
    }

    /// Start-up settings picked from the territory.
    pub fn from_territory(territory: &Territory) -> Self {
        // Picked values are finite and already inside their ranges.
        Self::new(
            pick_lfo_hz(territory),
            pick_carrier_hz(territory),
            PROXY_START_DEPTH,
            PROXY_START_BASE_AMP,
        )
        .unwrap_or_default()
    }
}

fn clamped(field: &'static str, value: f32, range: (f32, f32)) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    Ok(value.clamp(range.0, range.1))
}

/// A running modulation proxy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModulationProxy {
    pub config: ModulationConfig,
    pub start_sec: f64,
}

impl ModulationProxy {
    pub fn new(config: ModulationConfig, start_sec: f64) -> Self {
        Self { config, start_sec }
    }

    /// Proxy gain at `now_sec`, between `base·(1−depth)` and `base`.
    pub fn gain_at(&self, now_sec: f64) -> f32 {
        let t = (now_sec - self.start_sec).max(0.0) as f32;
        let lfo = unit_sine(self.config.lfo_hz, t);
        let c = &self.config;
        c.base_amplitude * ((1.0 - c.depth) + c.depth * lfo)
    }

    /// Re-pick rate and carrier from the current territory.
    pub fn retune(&mut self, territory: &Territory) {
        self.config.lfo_hz = pick_lfo_hz(territory);
        self.config.carrier_hz = pick_carrier_hz(territory);
    }
}

/// Instructions for the front-end audio graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCommand {
    /// Build master, compressor and tone sources (all silent).
    BuildGraph { tone_hz: f32, sub_hz: f32 },
    FadeIn,
    FadeOut,
    StartProxy(ModulationConfig),
    StopProxy,
    Tone(ToneTargets),
    ProxyGain(f32),
    RetuneProxy { carrier_hz: f32 },
}

pub type AudioCommands = SmallVec<[AudioCommand; 8]>;

/// Per-frame inputs to the audio engine.
#[derive(Clone, Copy, Debug)]
pub struct AudioFrame<'a> {
    pub territory: &'a Territory,
    pub now_sec: f64,
    pub session_t: f32,
    pub breath: f32,
    pub cohesion: f32,
    /// Session running, not paused, visible and not yet complete.
    pub wants_sound: bool,
}

#[derive(Debug, Default)]
pub struct AudioEngine {
    graph_built: bool,
    audible: bool,
    proxy: Option<ModulationProxy>,
    audible_frames: u64,
}

impl AudioEngine {
    pub fn is_audible(&self) -> bool {
        self.audible
    }

    pub fn proxy(&self) -> Option<&ModulationProxy> {
        self.proxy.as_ref()
    }

    /// Emit this frame's commands. Call only while the audio resource is active.
    pub fn update(&mut self, frame: &AudioFrame, out: &mut AudioCommands) {
        if !self.graph_built {
            out.push(AudioCommand::BuildGraph {
                tone_hz: frame.territory.tone_base_hz,
                sub_hz: frame.territory.sub_base_hz,
            });
            self.graph_built = true;
        }

        if frame.wants_sound && !self.audible {
            let config = ModulationConfig::from_territory(frame.territory);
            self.proxy = Some(ModulationProxy::new(config, frame.now_sec));
            out.push(AudioCommand::FadeIn);
            out.push(AudioCommand::StartProxy(config));
            self.audible = true;
            log::info!(
                "[audio] fade in; proxy lfo={:.2}Hz carrier={:.1}Hz",
                config.lfo_hz,
                config.carrier_hz
            );
        } else if !frame.wants_sound && self.audible {
            out.push(AudioCommand::FadeOut);
            out.push(AudioCommand::StopProxy);
            self.proxy = None;
            self.audible = false;
            log::info!("[audio] fade out");
        }

        if !self.audible {
            return;
        }

        out.push(AudioCommand::Tone(tone_targets(
            frame.territory,
            frame.session_t,
            frame.breath,
            frame.cohesion,
        )));

        self.audible_frames += 1;
        if let Some(proxy) = self.proxy.as_mut() {
            if self.audible_frames % PROXY_RETUNE_FRAMES == 0 {
                proxy.retune(frame.territory);
                out.push(AudioCommand::RetuneProxy {
                    carrier_hz: proxy.config.carrier_hz,
                });
            }
            out.push(AudioCommand::ProxyGain(proxy.gain_at(frame.now_sec)));
        }
    }
}

/// Deterministic pink noise in `[-1, 1]`: xorshift white noise through a
/// three-pole Kellet filter, normalized to its peak.
pub fn pink_noise(len: usize, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    let (mut b0, mut b1, mut b2) = (0.0_f32, 0.0_f32, 0.0_f32);
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let white = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
        b0 = 0.99765 * b0 + white * 0.099_046;
        b1 = 0.96300 * b1 + white * 0.296_516_4;
        b2 = 0.57000 * b2 + white * 1.052_691_3;
        out.push(b0 + b1 + b2 + white * 0.1848);
    }
    let peak = out.iter().fold(0.0_f32, |m, v| m.max(v.abs()));
    if peak > 0.0 {
        for v in out.iter_mut() {
            *v /= peak;
        }
    }
    out
}
