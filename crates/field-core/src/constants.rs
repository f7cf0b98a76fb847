// Shared tuning constants for the field, the session and the audio layers.

// Session
pub const SESSION_SECONDS: f32 = 120.0;
pub const BREATH_HZ: f32 = 0.1; // one breath every ten seconds
pub const DEFAULT_INTENSITY: f32 = 0.68;
pub const INTENSITY_STEP: f32 = 0.05; // ArrowUp / ArrowDown

// Particle population
pub const MAX_PARTICLES_BASE: usize = 720; // scaled by territory density
pub const MIN_PARTICLES: usize = 350;
pub const MAX_PARTICLES: usize = 1100;
pub const RESIZE_BATCH: usize = 12; // particles added/removed per frame

// Particle motion
pub const WRAP_MARGIN: f32 = 20.0;
pub const NOISE_TIME_STEP: f64 = 0.002; // flow noise z advance per frame
pub const LATTICE_DIRECTIONS: f32 = 8.0;
pub const SWIRL_ROTATION: f32 = 0.35;
pub const JITTER_SCALE: f32 = 0.15;
pub const FLOW_GAIN: f32 = 0.33;
pub const ORDER_MIN_DISTANCE: f32 = 40.0;
pub const ORDER_REFERENCE_DISTANCE: f32 = 180.0;
pub const ORDER_BASE: f32 = 0.12;
pub const ORDER_COHESION_GAIN: f32 = 1.55;
pub const LATTICE_ORDER_BOOST: f32 = 1.15;
pub const BURST_ORDER_DAMP: f32 = 0.95;
pub const SPEED_CEILING: f32 = 2.35;

// Particle sprites
pub const TRAIL_COHESION_MIN: f32 = 0.28;
pub const TRAIL_LENGTH: f32 = 7.0;
pub const LINK_COHESION_MIN: f32 = 0.25;

// Audio graph
pub const MASTER_GAIN: f32 = 0.22;
pub const COMPRESSOR_THRESHOLD_DB: f32 = -24.0;
pub const COMPRESSOR_RATIO: f32 = 6.0;
pub const COMPRESSOR_ATTACK_SEC: f32 = 0.003;
pub const COMPRESSOR_RELEASE_SEC: f32 = 0.25;

// Audio ramps (seconds)
pub const FADE_SEC: f64 = 0.2;
pub const FADE_IN_CARRIER_AMP: f32 = 0.02;
pub const CARRIER_FREQ_RAMP_SEC: f64 = 0.06;
pub const SUB_FREQ_RAMP_SEC: f64 = 0.08;
pub const CARRIER_AMP_RAMP_SEC: f64 = 0.08;
pub const SUB_AMP_RAMP_SEC: f64 = 0.12;
pub const NOISE_AMP_RAMP_SEC: f64 = 0.12;
pub const PROXY_ATTACK_SEC: f64 = 0.3;
pub const PROXY_GAIN_RAMP_SEC: f64 = 0.03;
pub const PROXY_RETUNE_RAMP_SEC: f64 = 0.2;
pub const PROXY_RETUNE_FRAMES: u64 = 120; // ~2 s at 60 Hz

// Modulation proxy start values
pub const PROXY_START_DEPTH: f32 = 0.78;
pub const PROXY_START_BASE_AMP: f32 = 0.10;

// Pink noise loop
pub const PINK_NOISE_SECONDS: f32 = 2.0;
pub const PINK_NOISE_SEED: u32 = 0x5EED_F1E1;

// Geolocation request options
pub const GEO_ENABLE_HIGH_ACCURACY: bool = false;
pub const GEO_TIMEOUT_MS: u32 = 5_000;
pub const GEO_MAXIMUM_AGE_MS: u32 = 600_000;

// Weather lookup
pub const WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const WEATHER_CURRENT_FIELDS: &str =
    "temperature_2m,wind_speed_10m,relative_humidity_2m,shortwave_radiation";

// Palette (RGB)
pub const ARC_OUTER_RGB: [u8; 3] = [120, 190, 255];
pub const ARC_INNER_RGB: [u8; 3] = [180, 255, 200];
pub const MIST_RGB: [u8; 3] = [120, 220, 255];
pub const CHEM_GLOW_A_RGB: [u8; 3] = [80, 220, 255];
pub const CHEM_GLOW_B_RGB: [u8; 3] = [120, 180, 255];
pub const COMPLETION_RGB: [u8; 3] = [120, 120, 255];
pub const PARTICLE_RGB: [u8; 3] = [120, 190, 255];
pub const TRAIL_RGB: [u8; 3] = [180, 255, 200];
pub const LINK_RGB: [u8; 3] = [200, 255, 220];
pub const BACKGROUND_VEIL_ALPHA: f32 = 28.0;

// Titles
pub const TITLE: &str = "Mandibular Field — Coherence & Repair (Visual)";
pub const SIGN_LINE_1: &str = "EDUARDO ROMAGUERA (2026)";
pub const SIGN_LINE_2: &str = "cellular regeneration";
