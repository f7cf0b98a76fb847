//! Environmental parameters that shape the field and its sound.
//!
//! A `Territory` starts from fixed defaults, optionally receives a location
//! fix and a weather lookup, and re-derives its multipliers after every
//! change. All normalized ratios are clamped to `[0, 1]`.

use crate::constants::{WEATHER_CURRENT_FIELDS, WEATHER_ENDPOINT};
use crate::error::WeatherError;
use crate::mapping::{lerp, normalize};
use serde::Deserialize;

pub const DEFAULT_LATITUDE: f64 = 39.47;
pub const DEFAULT_LONGITUDE: f64 = -0.38;
pub const DEFAULT_TEMPERATURE_C: f32 = 20.0;
pub const DEFAULT_HUMIDITY_PCT: f32 = 55.0;
pub const DEFAULT_WIND_MS: f32 = 2.0;
pub const DEFAULT_SOLAR_WM2: f32 = 300.0;

// Normalization ranges
pub const TEMPERATURE_RANGE: (f32, f32) = (-5.0, 35.0);
pub const HUMIDITY_RANGE: (f32, f32) = (10.0, 90.0);
pub const WIND_RANGE: (f32, f32) = (0.0, 18.0);
pub const SOLAR_RANGE: (f32, f32) = (0.0, 900.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Territory {
    pub latitude: f64,
    pub longitude: f64,
    pub has_geolocation: bool,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub wind_ms: f32,
    pub solar_wm2: f32,
    pub density_multiplier: f32,
    pub drift_multiplier: f32,
    pub tone_base_hz: f32,
    pub sub_base_hz: f32,
    pub noise_amplitude: f32,
}

impl Default for Territory {
    fn default() -> Self {
        let mut t = Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            has_geolocation: false,
            temperature_c: 0.0,
            humidity_pct: 0.0,
            wind_ms: 0.0,
            solar_wm2: 0.0,
            density_multiplier: 1.0,
            drift_multiplier: 1.0,
            tone_base_hz: 174.0,
            sub_base_hz: 38.0,
            noise_amplitude: 0.008,
        };
        t.initialize_defaults();
        t
    }
}

impl Territory {
    /// Reset the weather readings to the fallback climate and re-derive.
    pub fn initialize_defaults(&mut self) {
        self.temperature_c = DEFAULT_TEMPERATURE_C;
        self.humidity_pct = DEFAULT_HUMIDITY_PCT;
        self.wind_ms = DEFAULT_WIND_MS;
        self.solar_wm2 = DEFAULT_SOLAR_WM2;
        self.derive_parameters();
    }

    pub fn temperature_norm(&self) -> f32 {
        normalize(self.temperature_c, TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)
    }

    pub fn humidity_norm(&self) -> f32 {
        normalize(self.humidity_pct, HUMIDITY_RANGE.0, HUMIDITY_RANGE.1)
    }

    pub fn wind_norm(&self) -> f32 {
        normalize(self.wind_ms, WIND_RANGE.0, WIND_RANGE.1)
    }

    pub fn solar_norm(&self) -> f32 {
        normalize(self.solar_wm2, SOLAR_RANGE.0, SOLAR_RANGE.1)
    }

    pub fn derive_parameters(&mut self) {
        let temp = self.temperature_norm();
        let hum = self.humidity_norm();
        let wind = self.wind_norm();
        let sol = self.solar_norm();

        self.density_multiplier = lerp(0.85, 1.25, hum) * lerp(1.15, 0.9, wind);
        self.drift_multiplier = lerp(0.85, 1.25, wind) * lerp(0.95, 1.10, sol);
        self.tone_base_hz = lerp(164.0, 220.0, temp) * lerp(0.95, 1.05, hum);
        self.sub_base_hz = lerp(28.0, 58.0, sol) * lerp(0.95, 1.05, wind);
        self.noise_amplitude = lerp(0.004, 0.014, wind);
    }

    /// Record a location fix. The weather lookup for it happens host-side.
    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.latitude = latitude;
        self.longitude = longitude;
        self.has_geolocation = true;
    }

    /// No location capability, permission denied or timeout.
    pub fn mark_location_unavailable(&mut self) {
        self.has_geolocation = false;
        self.derive_parameters();
    }

    /// Overwrite readings present in `current`; absent ones keep their value.
    /// A solar reading of exactly zero counts as absent.
    pub fn apply_weather(&mut self, current: &CurrentConditions) {
        if let Some(t) = current.temperature_2m {
            self.temperature_c = t;
        }
        if let Some(w) = current.wind_speed_10m {
            self.wind_ms = w;
        }
        if let Some(h) = current.relative_humidity_2m {
            self.humidity_pct = h;
        }
        match current.shortwave_radiation {
            Some(s) if s != 0.0 => self.solar_wm2 = s,
            _ => {}
        }
        self.derive_parameters();
    }

    /// Open-Meteo query for this territory's coordinates.
    pub fn weather_url(&self) -> String {
        weather_url(self.latitude, self.longitude)
    }
}

pub fn weather_url(latitude: f64, longitude: f64) -> String {
    format!(
        "{}?latitude={}&longitude={}&current={}",
        WEATHER_ENDPOINT, latitude, longitude, WEATHER_CURRENT_FIELDS
    )
}

/// `current` block of the weather response. Every field is optional.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub temperature_2m: Option<f32>,
    pub wind_speed_10m: Option<f32>,
    pub relative_humidity_2m: Option<f32>,
    pub shortwave_radiation: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
}

/// Decode a weather body; a missing `current` block yields empty conditions.
pub fn parse_weather(body: &str) -> Result<CurrentConditions, WeatherError> {
    let resp: WeatherResponse = serde_json::from_str(body)?;
    Ok(resp.current.unwrap_or_default())
}
