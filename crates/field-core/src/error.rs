use thiserror::Error;

/// Failure fetching or decoding a weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("weather request failed: {0}")]
    Request(String),
}

/// Rejected modulation proxy configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}
