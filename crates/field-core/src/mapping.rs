//! Small scalar helpers shared by the territory, field and audio mappings.

use std::f32::consts::{FRAC_PI_2, TAU};

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `value` from `[lo, hi]` onto `[0, 1]`, clamped.
#[inline]
pub fn normalize(value: f32, lo: f32, hi: f32) -> f32 {
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Sine oscillating in `[0, 1]`, starting at 0 when `t = 0`.
#[inline]
pub fn unit_sine(hz: f32, t: f32) -> f32 {
    ((TAU * hz * t - FRAC_PI_2).sin() + 1.0) * 0.5
}

/// Cubic ease-in-out on `[0, 1]`.
#[inline]
pub fn ease_in_out(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unit_sine_starts_at_trough() {
        assert!(unit_sine(0.1, 0.0).abs() < 1e-6);
        assert!((unit_sine(0.1, 5.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normalize_clamps_out_of_range() {
        assert_eq!(normalize(-50.0, -5.0, 35.0), 0.0);
        assert_eq!(normalize(90.0, -5.0, 35.0), 1.0);
        assert!((normalize(15.0, -5.0, 35.0) - 0.5).abs() < 1e-6);
    }
}
