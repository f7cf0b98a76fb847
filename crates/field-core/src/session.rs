//! Session timing: elapsed time since the last (re)start mapped to cohesion.
//!
//! Pausing freezes the clock; time spent paused does not count towards the
//! session, so resuming continues from the same progress.

use crate::constants::{BREATH_HZ, SESSION_SECONDS};
use crate::mapping::{ease_in_out, unit_sine};

#[derive(Clone, Debug)]
pub struct SessionClock {
    start_sec: f64,
    duration_sec: f32,
    paused_at: Option<f64>,
    paused_total: f64,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new(SESSION_SECONDS)
    }
}

impl SessionClock {
    pub fn new(duration_sec: f32) -> Self {
        Self {
            start_sec: 0.0,
            duration_sec: duration_sec.max(f32::EPSILON),
            paused_at: None,
            paused_total: 0.0,
        }
    }

    /// Start over from `now`. Keeps the paused flag.
    pub fn restart(&mut self, now_sec: f64) {
        self.start_sec = now_sec;
        self.paused_total = 0.0;
        if self.paused_at.is_some() {
            self.paused_at = Some(now_sec);
        }
    }

    pub fn pause(&mut self, now_sec: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now_sec);
        }
    }

    pub fn resume(&mut self, now_sec: f64) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += (now_sec - at).max(0.0);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn duration(&self) -> f32 {
        self.duration_sec
    }

    /// Seconds of unpaused session time.
    pub fn elapsed(&self, now_sec: f64) -> f32 {
        let reference = self.paused_at.unwrap_or(now_sec);
        (reference - self.start_sec - self.paused_total).max(0.0) as f32
    }

    pub fn progress(&self, now_sec: f64) -> f32 {
        (self.elapsed(now_sec) / self.duration_sec).clamp(0.0, 1.0)
    }

    pub fn cohesion(&self, now_sec: f64, intensity: f32) -> f32 {
        ease_in_out(self.progress(now_sec)) * intensity
    }

    pub fn is_complete(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }

    /// Whole seconds left, as shown in the HUD.
    pub fn seconds_left(&self, now_sec: f64) -> u32 {
        (self.duration_sec - self.elapsed(now_sec)).ceil().max(0.0) as u32
    }
}

/// Breathing phase in `[0, 1]` for session time `t`.
pub fn breath_phase(t: f32) -> f32 {
    unit_sine(BREATH_HZ, t)
}
