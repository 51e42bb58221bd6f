//! Procedural surface synthesis for the inner shell (sclera, iris, pupil)
//! and the alpha/reflection mask for the cornea shell.
//!
//! Every field here is a closed-form function of the surface direction: no
//! textures, no lookup state. The layer ordering and the radii, exponents,
//! and frequencies are contract values; each layer composites over the
//! previous one, so reordering them changes the look. The only time-varying
//! input is the pupil radius, which callers pre-compute per frame.

use glam::{Vec2, Vec3};

use crate::constants::{IRIS_RADIUS, PUPIL_SCALLOP, SOCKET_CUTOFF};
use crate::math::{mix, mix_vec3, smoothstep};
use crate::noise::{fbm, noise2};

/// Flat stand-in for the unmodeled socket interior behind the eye.
pub const SOCKET_COLOR: Vec3 = Vec3::new(0.8, 0.2, 0.2);

/// Ragged pupil boundary: the configured radius plus a noise scallop that
/// keeps the edge from reading as a perfect circle.
#[inline]
pub fn pupil_edge_radius(base: f32, angle: f32) -> f32 {
    base + fbm(Vec2::new(angle * 12.0, 0.0)) * PUPIL_SCALLOP
}

/// Radial gradient between the two configured iris colors, perturbed (not
/// replaced) by the macro pigment field.
#[inline]
pub fn iris_gradient(c1: Vec3, c2: Vec3, normalized_r: f32, macro_pigment: f32) -> Vec3 {
    mix_vec3(c1, c2, normalized_r + macro_pigment * 0.4)
}

/// Sclera color at polar coordinates (r, a) for surface direction `p`:
/// off-white base, caruncle reddening toward the corners, uneven yellow
/// tint, and two correlated vein networks fading in past the limbus.
pub fn sclera_color(p: Vec3, r: f32, a: f32) -> Vec3 {
    let mut color = Vec3::new(0.92, 0.90, 0.88);

    let pinkness = smoothstep(0.6, 1.0, p.x.abs()) * smoothstep(0.0, 0.5, r);
    color = mix_vec3(color, Vec3::new(0.85, 0.4, 0.4), pinkness * 0.6);

    let yellowing = fbm(Vec2::new(p.x * 2.0, p.y * 2.0)) * smoothstep(0.5, 0.8, r);
    color = mix_vec3(color, Vec3::new(0.9, 0.85, 0.6), yellowing * 0.4);

    // Both vein networks ride the same low-frequency warp so they stay
    // spatially correlated instead of reading as two unrelated overlays.
    let warp = fbm(Vec2::new(a * 5.0, r * 3.0));
    let vein1 = (1.0 - noise2(Vec2::new(a * 8.0 + warp * 2.0, r * 10.0)).abs()).powf(30.0);
    let vein2 = (1.0 - noise2(Vec2::new(a * 20.0 - warp * 1.5, r * 20.0)).abs()).powf(20.0);
    let vein_fade = smoothstep(0.48, 1.0, r);
    color = mix_vec3(color, Vec3::new(0.4, 0.05, 0.05), vein1 * vein_fade * 0.8);
    color = mix_vec3(color, Vec3::new(0.6, 0.1, 0.1), vein2 * vein_fade * 0.5);
    color
}

/// Iris color before limbus blending and pupil handling: pigment gradient,
/// two fiber striation fields, the collarette ring, and crypt darkening.
pub fn iris_base_color(p: Vec3, a: f32, normalized_r: f32, c1: Vec3, c2: Vec3) -> Vec3 {
    let macro_pigment = fbm(Vec2::new(p.x * 3.0, p.y * 3.0));
    let fiber = fbm(Vec2::new(a * 30.0, normalized_r * 2.0));
    let fiber_fine = fbm(Vec2::new(a * 80.0, normalized_r * 5.0));

    let collarette_radius = 0.35 + fbm(Vec2::new(a * 8.0, 0.0)) * 0.05;
    let collarette_mask = smoothstep(collarette_radius - 0.08, collarette_radius, normalized_r)
        * smoothstep(collarette_radius + 0.12, collarette_radius, normalized_r);

    let crypts = smoothstep(0.5, 0.9, fbm(Vec2::new(a * 12.0, normalized_r * 6.0)))
        * smoothstep(0.1, 0.8, normalized_r);

    let mut iris = iris_gradient(c1, c2, normalized_r, macro_pigment);
    let fiber_strength = mix(0.5, 1.5, fiber) * mix(0.8, 1.2, fiber_fine);
    iris *= fiber_strength;
    iris = mix_vec3(iris, c1 * 1.5, collarette_mask * 0.6 * (1.0 - crypts));
    iris = mix_vec3(iris, iris * 0.1, crypts);
    iris
}

/// Iris-to-sclera blend weight at radius `r` (0 = iris, 1 = sclera). The
/// band edges wobble with low-amplitude noise so the limbus is not a
/// perfect circle.
pub fn limbus_blend(r: f32, a: f32) -> f32 {
    let n = fbm(Vec2::new(a * 15.0, r * 20.0)) * 0.02;
    smoothstep(0.42 + n, 0.48 + n, r)
}

/// Full surface color for a normalized inner-shell direction `p` given the
/// current (hippus-modulated, clamped) pupil radius.
pub fn shade(p: Vec3, pupil_base: f32, c1: Vec3, c2: Vec3) -> Vec3 {
    if p.z < SOCKET_CUTOFF {
        return SOCKET_COLOR;
    }
    let r = p.truncate().length();
    let a = p.y.atan2(p.x);

    let pupil_radius = pupil_edge_radius(pupil_base, a);
    let normalized_r = ((r - pupil_radius) / (IRIS_RADIUS - pupil_radius)).clamp(0.0, 1.0);

    let sclera = sclera_color(p, r, a);
    let mut iris = iris_base_color(p, a, normalized_r, c1, c2);

    // Deep shadow just outside the pupil sells the bowl's parallax.
    let pupil_shadow = smoothstep(pupil_radius, pupil_radius + 0.1, r);
    iris *= pupil_shadow;

    let mut color = if r < pupil_radius {
        Vec3::splat(0.002)
    } else {
        let blended = mix_vec3(iris, sclera, limbus_blend(r, a));
        let limbal_ring = smoothstep(0.4, 0.46, r) * smoothstep(0.52, 0.46, r);
        blended * mix(1.0, 0.4, limbal_ring)
    };

    // Eyelid-driven vertical shading, then the outer-rim occlusion falloff.
    let top_shadow = smoothstep(0.3, 0.9, p.y);
    color *= mix(1.0, 0.2, top_shadow);
    let bottom_shadow = smoothstep(-0.3, -0.9, p.y);
    color *= mix(1.0, 0.5, bottom_shadow);
    let ao = smoothstep(1.0, 0.7, r);
    color *= mix(0.3, 1.0, ao);
    color
}

/// Cornea alpha/reflection mask: glossiness falls off from the limbus
/// toward the sclera, and the eyelids occlude reflections top and bottom.
/// The configured reflection-intensity scalar is applied by the renderer.
pub fn cornea_mask(local: Vec3, world_y: f32) -> f32 {
    let r = local.truncate().length();
    let anatomical = 1.0 - smoothstep(0.5, 0.85, r);
    let top = 1.0 - smoothstep(0.35, 0.7, world_y);
    let bottom = 1.0 - smoothstep(0.35, 0.7, -world_y);
    anatomical * top * bottom
}
