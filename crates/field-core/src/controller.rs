//! Top-level owner of all field state.
//!
//! Host callbacks never touch this state directly: they push [`FieldEvent`]s
//! onto an [`EventQueue`](crate::input::EventQueue), and the frame loop hands
//! each drained event to [`FieldController::handle`] before calling
//! [`FieldController::frame`].

use crate::audio::{AudioCommands, AudioEngine, AudioFrame};
use crate::chemistry::ChemistryState;
use crate::constants::*;
use crate::input::{FieldEvent, HostEvent, InputEvent};
use crate::lifecycle::AudioLifecycle;
use crate::particles::{ParticleField, ParticleSprite, StepContext};
use crate::scene;
use crate::session::{breath_phase, SessionClock};
use crate::territory::Territory;
use crate::variant::{VariantParameters, VariantSelector};
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub base_particles: usize,
    pub session_seconds: f32,
    pub initial_intensity: f32,
    pub chemistry_visible: bool,
    pub master_gain: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_particles: MAX_PARTICLES_BASE,
            session_seconds: SESSION_SECONDS,
            initial_intensity: DEFAULT_INTENSITY,
            chemistry_visible: true,
            master_gain: MASTER_GAIN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first pointer press.
    Idle,
    Running,
    Paused,
}

/// Everything the front-end needs to draw and voice one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub phase: Phase,
    pub session_t: f32,
    pub progress: f32,
    pub cohesion: f32,
    pub breath: f32,
    pub locus: Vec2,
    pub complete: bool,
    pub seconds_left: u32,
    /// The front-end should start resuming the audio context.
    pub activate_audio: bool,
    pub audio: AudioCommands,
}

pub struct FieldController {
    config: FieldConfig,
    territory: Territory,
    chemistry: ChemistryState,
    selector: VariantSelector,
    variant: VariantParameters,
    field: ParticleField,
    clock: SessionClock,
    audio: AudioEngine,
    lifecycle: AudioLifecycle,
    intensity: f32,
    chemistry_visible: bool,
    started: bool,
    paused: bool,
    hidden: bool,
    viewport: Vec2,
    sprites: Vec<ParticleSprite>,
}

impl FieldController {
    pub fn new(config: FieldConfig, viewport: Vec2, seed: u64) -> Self {
        let territory = Territory::default();
        let chemistry = ChemistryState::derive(&territory);
        let variant = VariantParameters::default();
        let count = target_count(config.base_particles, &territory);
        Self {
            field: ParticleField::new(viewport, count, variant.seed),
            clock: SessionClock::new(config.session_seconds),
            intensity: config.initial_intensity.clamp(0.0, 1.0),
            chemistry_visible: config.chemistry_visible,
            selector: VariantSelector::new(seed),
            audio: AudioEngine::default(),
            lifecycle: AudioLifecycle::default(),
            started: false,
            paused: false,
            hidden: false,
            sprites: Vec::new(),
            config,
            territory,
            chemistry,
            variant,
            viewport,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn territory(&self) -> &Territory {
        &self.territory
    }

    pub fn chemistry(&self) -> &ChemistryState {
        &self.chemistry
    }

    pub fn variant(&self) -> &VariantParameters {
        &self.variant
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn sprites(&self) -> &[ParticleSprite] {
        &self.sprites
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn audio_lifecycle(&self) -> &AudioLifecycle {
        &self.lifecycle
    }

    pub fn audio(&self) -> &AudioEngine {
        &self.audio
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn chemistry_visible(&self) -> bool {
        self.chemistry_visible
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn handle(&mut self, ev: FieldEvent, now_sec: f64) {
        match ev {
            FieldEvent::Input(input) => self.handle_input(input, now_sec),
            FieldEvent::Host(host) => self.handle_host(host),
        }
    }

    fn handle_input(&mut self, ev: InputEvent, now_sec: f64) {
        match ev {
            InputEvent::PointerPressed => {
                self.lifecycle.request();
                if !self.started {
                    self.started = true;
                    self.paused = false;
                    self.clock.resume(now_sec);
                    log::info!("[session] started");
                    self.reseed(now_sec);
                } else if !self.paused {
                    self.reseed(now_sec);
                }
            }
            InputEvent::TogglePause => {
                if !self.started {
                    return;
                }
                self.paused = !self.paused;
                if self.paused {
                    self.clock.pause(now_sec);
                } else {
                    self.clock.resume(now_sec);
                }
                log::info!("[keys] paused={}", self.paused);
            }
            InputEvent::Restart => {
                let count = self.target_count();
                self.field.reinitialize(count, self.variant.seed);
                self.clock.restart(now_sec);
                log::info!("[keys] restarted particles and timer");
            }
            InputEvent::IntensityUp => {
                self.intensity = (self.intensity + INTENSITY_STEP).min(1.0);
            }
            InputEvent::IntensityDown => {
                self.intensity = (self.intensity - INTENSITY_STEP).max(0.0);
            }
            InputEvent::ToggleChemistry => {
                self.chemistry_visible = !self.chemistry_visible;
            }
            InputEvent::Reseed => self.reseed(now_sec),
        }
    }

    fn handle_host(&mut self, ev: HostEvent) {
        match ev {
            HostEvent::Resized { width, height } => {
                self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
                self.field.set_bounds(self.viewport.x, self.viewport.y);
            }
            HostEvent::VisibilityChanged { hidden } => {
                self.hidden = hidden;
            }
            HostEvent::AudioResumed => {
                if self.lifecycle.resolve(true) {
                    log::info!("[audio] context running");
                }
            }
            HostEvent::AudioResumeFailed => {
                self.lifecycle.resolve(false);
            }
            HostEvent::LocationFixed {
                latitude,
                longitude,
            } => {
                self.territory.set_location(latitude, longitude);
                log::info!("[territory] location {:.2},{:.2}", latitude, longitude);
            }
            HostEvent::LocationUnavailable => {
                self.territory.mark_location_unavailable();
                self.rederive_chemistry();
                log::info!("[territory] no geolocation; using defaults");
            }
            HostEvent::WeatherArrived(current) => {
                self.territory.apply_weather(&current);
                self.rederive_chemistry();
                let t = &self.territory;
                log::info!(
                    "[territory] weather temp={:.1} hum={:.0} wind={:.1} solar={:.0}",
                    t.temperature_c,
                    t.humidity_pct,
                    t.wind_ms,
                    t.solar_wm2
                );
            }
            HostEvent::WeatherFailed => {
                self.territory.derive_parameters();
                self.rederive_chemistry();
                log::warn!("[territory] weather lookup failed; keeping current values");
            }
        }
    }

    fn rederive_chemistry(&mut self) {
        self.chemistry = ChemistryState::derive(&self.territory);
    }

    fn target_count(&self) -> usize {
        target_count(self.config.base_particles, &self.territory)
    }

    /// New variant, fresh particle population, session restarted.
    pub fn reseed(&mut self, now_sec: f64) {
        self.variant = self.selector.reseed(self.territory.temperature_norm());
        let count = self.target_count();
        self.field.reinitialize(count, self.variant.seed);
        self.clock.restart(now_sec);
    }

    pub fn frame(&mut self, now_sec: f64) -> FrameSnapshot {
        // The clock only runs once the first press has started a session.
        let (session_t, progress, cohesion, seconds_left) = if self.started {
            (
                self.clock.elapsed(now_sec),
                self.clock.progress(now_sec),
                self.clock.cohesion(now_sec, self.intensity),
                self.clock.seconds_left(now_sec),
            )
        } else {
            (0.0, 0.0, 0.0, self.clock.duration().ceil() as u32)
        };
        let breath = breath_phase(session_t);
        let locus = scene::locus(self.viewport.x, self.viewport.y, breath);
        let complete = progress >= 1.0;

        let phase = match (self.started, self.paused) {
            (false, _) => Phase::Idle,
            (true, true) => Phase::Paused,
            (true, false) => Phase::Running,
        };

        if phase == Phase::Running {
            self.field.resize(self.target_count());
            let ctx = StepContext {
                variant: &self.variant,
                drift_multiplier: self.territory.drift_multiplier,
                energy: self.chemistry.energy,
            };
            self.field.step(locus, breath, cohesion, &ctx);
            self.field.sprites(
                cohesion,
                &self.chemistry,
                self.chemistry_visible,
                &mut self.sprites,
            );
        }

        let mut audio = AudioCommands::new();
        if self.lifecycle.is_active() {
            let frame = AudioFrame {
                territory: &self.territory,
                now_sec,
                session_t,
                breath,
                cohesion,
                wants_sound: phase == Phase::Running && !self.hidden && !complete,
            };
            self.audio.update(&frame, &mut audio);
        }

        FrameSnapshot {
            phase,
            session_t,
            progress,
            cohesion,
            breath,
            locus,
            complete,
            seconds_left,
            activate_audio: self.lifecycle.take_request(),
            audio,
        }
    }
}

/// Particle population the territory asks for, before clamping.
pub fn target_count(base: usize, territory: &Territory) -> usize {
    (base as f32 * territory.density_multiplier).floor() as usize
}
