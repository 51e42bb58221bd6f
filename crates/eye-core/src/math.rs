//! Shading-language style shaping helpers shared by the shading, geometry,
//! and gaze modules. Semantics match GLSL/WGSL exactly, including the
//! unclamped `mix` and the inverted-edge `smoothstep` the shading layers
//! rely on.

use glam::Vec3;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// GLSL `mix`: unclamped linear blend.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn mix_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// GLSL `smoothstep`: Hermite ramp between the edges. Works with
/// `edge0 > edge1` (descending ramp) the same way shader code does.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
