//! Text read-outs: start screen, paused notice and the running HUD.

use crate::chemistry::ChemistryState;
use crate::constants::TITLE;
use crate::territory::Territory;
use crate::variant::MotionMode;

/// Values the running HUD reports.
#[derive(Clone, Copy, Debug)]
pub struct HudSnapshot<'a> {
    pub audio_state: &'a str,
    pub seconds_left: u32,
    pub cohesion: f32,
    pub intensity: f32,
    pub motion_mode: MotionMode,
    pub territory: &'a Territory,
    pub chemistry: &'a ChemistryState,
    pub chemistry_visible: bool,
}

pub fn hud_lines(s: &HudSnapshot) -> [String; 4] {
    let t = s.territory;
    let chem = if s.chemistry_visible {
        format!(
            "Symbolic chemistry → Hyd:{:.2}  Redox:{:.2}  pH:{:.2}",
            s.chemistry.hydration, s.chemistry.redox, s.chemistry.ph
        )
    } else {
        "Symbolic chemistry off".to_string()
    };
    [
        format!("AudioContext: {}", s.audio_state),
        format!(
            "Time: {}s · Cohesion: {:.2} · Int: {:.2} · Var: {}",
            s.seconds_left,
            s.cohesion,
            s.intensity,
            s.motion_mode.name()
        ),
        format!(
            "Temp: {:.0}°C  Hum: {:.0}%  Wind: {:.1}m/s  Solar: {:.0}W/m²",
            t.temperature_c, t.humidity_pct, t.wind_ms, t.solar_wm2
        ),
        chem,
    ]
}

pub fn start_screen_lines(has_geolocation: bool) -> [&'static str; 4] {
    let geo = if has_geolocation {
        "Territory: geolocation active"
    } else {
        "Territory: default values (no geolocation)"
    };
    [
        TITLE,
        "Click to begin (audio needs an interaction)",
        geo,
        "Space: pause · R: restart · ↑/↓: intensity · C: chemistry · V: variant",
    ]
}

pub const PAUSED_LINE: &str = "Paused — press SPACE";
