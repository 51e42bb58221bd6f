//! Pupil dynamics layered under the surface shader.

use crate::constants::{PUPIL_MAX, PUPIL_MIN};

/// Hippus: the natural low-amplitude oscillation of pupil size. Pure
/// function of the clock, bounded by +/-0.015.
#[inline]
pub fn hippus(t: f32) -> f32 {
    (t * 2.0).sin() * 0.005 + (t * 0.5).sin() * 0.01
}

/// Configured base size plus hippus, clamped so the radius comparisons in
/// the shader never see a degenerate iris band.
#[inline]
pub fn effective_pupil_radius(base: f32, t: f32) -> f32 {
    (base + hippus(t)).clamp(PUPIL_MIN, PUPIL_MAX)
}
