// Host-side tests for the surface shader, pupil dynamics, and the cornea
// mask: layer classification, color-mix endpoints, and boundedness.

use eye_core::{
    color_from_hex, cornea_mask, effective_pupil_radius, hippus, iris_gradient, limbus_blend,
    pupil_edge_radius, shade, EyeAssembly, EyeConfig, EyeSide, SOCKET_COLOR,
};
use glam::Vec3;

/// Direction on the unit sphere with the given front-cap radius, at angle 0.
fn front_dir(r: f32) -> Vec3 {
    Vec3::new(r, 0.0, (1.0 - r * r).sqrt())
}

fn default_colors() -> (Vec3, Vec3) {
    (color_from_hex(0x1e3a8a), color_from_hex(0x3b82f6))
}

#[test]
fn hippus_is_bounded() {
    let mut t = -1_000.0_f32;
    while t < 1_000.0 {
        let h = hippus(t);
        assert!(h.abs() <= 0.015 + 1e-6, "hippus({t}) out of range: {h}");
        t += 0.37;
    }
}

#[test]
fn effective_pupil_radius_stays_in_the_sane_band() {
    let mut t = 0.0_f32;
    while t < 200.0 {
        let r = effective_pupil_radius(0.15, t);
        assert!((0.02..=0.45).contains(&r));
        // Degenerate base sizes are pulled back into the band.
        assert!(effective_pupil_radius(0.0, t) >= 0.02);
        assert!(effective_pupil_radius(1.0, t) <= 0.45);
        t += 0.11;
    }
}

#[test]
fn pupil_edge_scallop_is_small_and_centered() {
    for i in 0..256 {
        let a = i as f32 / 256.0 * std::f32::consts::TAU - std::f32::consts::PI;
        let edge = pupil_edge_radius(0.15, a);
        assert!(
            (edge - 0.15).abs() <= 0.015,
            "scallop too large at a={a}: {edge}"
        );
    }
}

#[test]
fn iris_gradient_endpoints_are_the_configured_colors() {
    let (c1, c2) = default_colors();
    // Mix weight 0 reproduces color1 exactly.
    assert_eq!(iris_gradient(c1, c2, 0.0, 0.0), c1);
    // Weight 1 reproduces color2 (up to one rounding step per channel).
    let at_one = iris_gradient(c1, c2, 1.0, 0.0);
    assert!((at_one - c2).length() < 1e-6, "got {at_one:?}");
}

#[test]
fn pupil_point_shades_near_black() {
    let (c1, c2) = default_colors();
    let color = shade(front_dir(0.05), 0.15, c1, c2);
    assert!(
        color.max_element() < 0.01,
        "pupil sample not near-black: {color:?}"
    );
}

#[test]
fn iris_point_is_past_the_pupil_and_before_the_limbus() {
    for i in 0..64 {
        let a = i as f32 / 64.0 * std::f32::consts::TAU - std::f32::consts::PI;
        assert!(
            pupil_edge_radius(0.15, a) < 0.30,
            "pupil edge reached the iris sample"
        );
        assert_eq!(
            limbus_blend(0.30, a),
            0.0,
            "limbus blend must be pure iris at r=0.30"
        );
    }
}

#[test]
fn sclera_point_blend_weight_exceeds_nine_tenths() {
    for i in 0..64 {
        let a = i as f32 / 64.0 * std::f32::consts::TAU - std::f32::consts::PI;
        let w = limbus_blend(0.50, a);
        assert!(w >= 0.9, "blend at r=0.50 not sclera-dominated: {w}");
    }
}

#[test]
fn back_cap_uses_the_socket_color() {
    let (c1, c2) = default_colors();
    let p = Vec3::new(0.3, 0.2, -0.93).normalize();
    assert_eq!(shade(p, 0.15, c1, c2), SOCKET_COLOR);
}

#[test]
fn shade_is_total_over_the_sphere() {
    let (c1, c2) = default_colors();
    for i in 0..40 {
        for j in 0..40 {
            let theta = std::f32::consts::PI * i as f32 / 39.0;
            let phi = std::f32::consts::TAU * j as f32 / 39.0;
            let p = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let color = shade(p, 0.15, c1, c2);
            assert!(
                color.x.is_finite() && color.y.is_finite() && color.z.is_finite(),
                "non-finite shade at {p:?}"
            );
        }
    }
}

#[test]
fn shading_is_identical_across_eye_instances() {
    let config = EyeConfig::default();
    let left = EyeAssembly::new(config, EyeSide::Left, 5);
    let right = EyeAssembly::new(config, EyeSide::Right, 77);
    for r in [0.05_f32, 0.2, 0.3, 0.5, 0.8] {
        let p = front_dir(r);
        assert_eq!(
            left.shade(p),
            right.shade(p),
            "spatial fields must not depend on the eye instance"
        );
    }
}

#[test]
fn cornea_mask_is_full_at_the_center() {
    assert_eq!(cornea_mask(Vec3::new(0.0, 0.0, 1.07), 0.0), 1.0);
}

#[test]
fn cornea_mask_fades_at_the_rim_and_under_the_lids() {
    // Glossiness gone well outside the limbus.
    assert_eq!(cornea_mask(Vec3::new(0.9, 0.0, 0.4), 0.0), 0.0);
    // Eyelid occlusion top and bottom.
    assert_eq!(cornea_mask(Vec3::new(0.0, 0.0, 1.07), 0.75), 0.0);
    assert_eq!(cornea_mask(Vec3::new(0.0, 0.0, 1.07), -0.75), 0.0);
    // Partial occlusion inside the falloff band.
    let partial = cornea_mask(Vec3::new(0.3, 0.0, 1.0), 0.5);
    assert!(partial > 0.0 && partial < 1.0, "got {partial}");
}
