// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

/// Linear RGB radiance or reflectance.
pub type RGBSpectrum = Vector3f;

pub fn is_black(s: &RGBSpectrum) -> bool {
    s.iter().all(|c| *c == 0.0)
}

pub fn is_valid(s: &RGBSpectrum) -> bool {
    s.iter().all(|c| c.is_finite() && *c >= 0.0)
}

/// Bounds one radiance sample to `[0, max_value]` per channel; channels
/// that are not finite count as zero.
pub fn clamp_sample(s: &RGBSpectrum, max_value: Float) -> RGBSpectrum {
    s.map(|c| if c.is_finite() { c.max(0.0).min(max_value) } else { 0.0 })
}
