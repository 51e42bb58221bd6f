//! Deterministic 2D gradient noise and its fractal composition.
//!
//! This is the permutation-polynomial simplex variant (mod-289 hashing), so
//! it needs no lookup tables and no state: the same coordinates always
//! produce the same value, which keeps the procedural surface identical
//! across frames and across independently-owned left/right eye instances.

use glam::{Vec2, Vec3};

// Skew/unskew constants for 2D simplex noise.
const C_X: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6
const C_Y: f32 = 0.366_025_4; // (sqrt(3) - 1) / 2
const C_Z: f32 = -0.577_350_3; // -1 + 2 * C_X
const C_W: f32 = 0.024_390_243; // 1 / 41

pub const FBM_OCTAVES: u32 = 5;

#[inline]
fn mod289(x: Vec3) -> Vec3 {
    x - (x / 289.0).floor() * 289.0
}

#[inline]
fn mod289_2(x: Vec2) -> Vec2 {
    x - (x / 289.0).floor() * 289.0
}

#[inline]
fn permute(x: Vec3) -> Vec3 {
    mod289((x * 34.0 + Vec3::ONE) * x)
}

/// 2D simplex gradient noise in [-1, 1]. Total over all real inputs; large
/// coordinates lose contrast to f32 precision but never produce NaN/Inf.
pub fn noise2(v: Vec2) -> f32 {
    let mut i = (v + Vec2::splat(v.dot(Vec2::splat(C_Y)))).floor();
    let x0 = v - i + Vec2::splat(i.dot(Vec2::splat(C_X)));

    // Offsets for the three simplex corners.
    let i1 = if x0.x > x0.y {
        Vec2::new(1.0, 0.0)
    } else {
        Vec2::new(0.0, 1.0)
    };
    let x1 = x0 + Vec2::splat(C_X) - i1;
    let x2 = x0 + Vec2::splat(C_Z);

    i = mod289_2(i);
    let p = permute(
        permute(Vec3::splat(i.y) + Vec3::new(0.0, i1.y, 1.0))
            + Vec3::splat(i.x)
            + Vec3::new(0.0, i1.x, 1.0),
    );

    let mut m = Vec3::new(0.5 - x0.dot(x0), 0.5 - x1.dot(x1), 0.5 - x2.dot(x2)).max(Vec3::ZERO);
    m = m * m;
    m = m * m;

    // Gradients from the hash, normalized approximately via the Taylor term.
    let px = p * C_W;
    let x = (px - px.floor()) * 2.0 - Vec3::ONE;
    let h = x.abs() - Vec3::splat(0.5);
    let ox = (x + Vec3::splat(0.5)).floor();
    let a0 = x - ox;
    m *= Vec3::splat(1.792_842_9) - (a0 * a0 + h * h) * 0.853_734_7;

    let g = Vec3::new(
        a0.x * x0.x + h.x * x0.y,
        a0.y * x1.x + h.y * x1.y,
        a0.z * x2.x + h.z * x2.y,
    );
    130.0 * m.dot(g)
}

/// Fractal Brownian motion: octaves of [`noise2`] at doubling frequency and
/// halving amplitude starting at 0.5, so the sum stays strictly inside
/// [-1, 1].
pub fn fbm_octaves(p: Vec2, octaves: u32) -> f32 {
    let mut sum = 0.0;
    let mut amp = 0.5;
    let mut q = p;
    for _ in 0..octaves {
        sum += amp * noise2(q);
        q *= 2.0;
        amp *= 0.5;
    }
    sum
}

/// The five-octave form used by every shading field.
#[inline]
pub fn fbm(p: Vec2) -> f32 {
    fbm_octaves(p, FBM_OCTAVES)
}
