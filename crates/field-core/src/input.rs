//! Events queued by host callbacks and drained by the controller once per frame.

use crate::territory::CurrentConditions;
use smallvec::SmallVec;

/// User input, already mapped from raw pointer/keyboard events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerPressed,
    TogglePause,
    Restart,
    IntensityUp,
    IntensityDown,
    ToggleChemistry,
    Reseed,
}

/// Platform notifications: layout, visibility and async completions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Resized { width: f32, height: f32 },
    VisibilityChanged { hidden: bool },
    AudioResumed,
    AudioResumeFailed,
    LocationFixed { latitude: f64, longitude: f64 },
    LocationUnavailable,
    WeatherArrived(CurrentConditions),
    WeatherFailed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldEvent {
    Input(InputEvent),
    Host(HostEvent),
}

impl From<InputEvent> for FieldEvent {
    fn from(ev: InputEvent) -> Self {
        FieldEvent::Input(ev)
    }
}

impl From<HostEvent> for FieldEvent {
    fn from(ev: HostEvent) -> Self {
        FieldEvent::Host(ev)
    }
}

#[inline]
pub fn input_for_key(key: &str) -> Option<InputEvent> {
    match key {
        " " => Some(InputEvent::TogglePause),
        "r" | "R" => Some(InputEvent::Restart),
        "ArrowUp" => Some(InputEvent::IntensityUp),
        "ArrowDown" => Some(InputEvent::IntensityDown),
        "c" | "C" => Some(InputEvent::ToggleChemistry),
        "v" | "V" => Some(InputEvent::Reseed),
        _ => None,
    }
}

/// Keys whose default browser action (scrolling) should be suppressed.
#[inline]
pub fn key_prevents_default(key: &str) -> bool {
    matches!(key, " " | "ArrowUp" | "ArrowDown")
}

#[derive(Debug, Default)]
pub struct EventQueue {
    events: SmallVec<[FieldEvent; 8]>,
}

impl EventQueue {
    pub fn push(&mut self, ev: impl Into<FieldEvent>) {
        self.events.push(ev.into());
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every queued event in arrival order.
    pub fn drain(&mut self) -> SmallVec<[FieldEvent; 8]> {
        std::mem::take(&mut self.events)
    }
}
