// Host-side tests for the shell geometry: displacement endpoint exactness,
// analytic normals, and the rebuilt cornea normals.

use eye_core::{
    build_cornea_shell, build_inner_shell, build_sphere, cornea_bulge_offset, iris_bowl_normal,
    iris_bowl_offset, recompute_vertex_normals, CORNEA_BULGE, IRIS_BOWL_DEPTH, IRIS_RADIUS,
    LIMBUS_RADIUS,
};
use glam::Vec3;

#[test]
fn iris_bowl_center_displacement_is_exact() {
    assert_eq!(iris_bowl_offset(0.0, 0.0, 1.0), -IRIS_BOWL_DEPTH);
}

#[test]
fn iris_bowl_edge_displacement_is_zero() {
    assert_eq!(iris_bowl_offset(IRIS_RADIUS, 0.0, 1.0), 0.0);
    assert_eq!(iris_bowl_offset(0.0, IRIS_RADIUS, 1.0), 0.0);
    // Just inside the rim the bowl is barely below the sphere.
    let just_inside = iris_bowl_offset(IRIS_RADIUS - 1e-4, 0.0, 1.0);
    assert!(just_inside < 0.0 && just_inside > -1e-3, "got {just_inside}");
}

#[test]
fn iris_bowl_ignores_back_hemisphere_and_sclera() {
    assert_eq!(iris_bowl_offset(0.1, 0.1, -0.9), 0.0);
    assert_eq!(iris_bowl_offset(0.0, 0.0, 0.0), 0.0);
    assert_eq!(iris_bowl_offset(0.6, 0.0, 0.7), 0.0);
}

#[test]
fn iris_bowl_normal_matches_partial_derivatives() {
    let (x, y) = (0.2_f32, -0.1_f32);
    let dzdx = 2.0 * IRIS_BOWL_DEPTH * x / (IRIS_RADIUS * IRIS_RADIUS);
    let dzdy = 2.0 * IRIS_BOWL_DEPTH * y / (IRIS_RADIUS * IRIS_RADIUS);
    let expected = Vec3::new(-dzdx, -dzdy, 1.0).normalize();
    let got = iris_bowl_normal(x, y);
    assert!(
        (got - expected).length() < 1e-6,
        "expected {expected:?}, got {got:?}"
    );
    // Flat at the bowl center.
    assert!((iris_bowl_normal(0.0, 0.0) - Vec3::Z).length() < 1e-6);
}

#[test]
fn cornea_apex_displacement_is_exact() {
    assert_eq!(cornea_bulge_offset(0.0, 0.0, 1.0), CORNEA_BULGE);
}

#[test]
fn cornea_base_displacement_is_zero() {
    assert_eq!(cornea_bulge_offset(LIMBUS_RADIUS, 0.0, 1.0), 0.0);
    assert_eq!(cornea_bulge_offset(0.0, 0.0, -1.0), 0.0);
}

#[test]
fn cornea_profile_slope_vanishes_at_both_endpoints() {
    let f = |r: f32| cornea_bulge_offset(r, 0.0, 1.0);
    let h = 1e-3;
    let apex_slope = (f(h) - f(0.0)) / h;
    assert!(
        apex_slope.abs() < 1e-3,
        "apex slope should vanish, got {apex_slope}"
    );
    let base_slope = (f(LIMBUS_RADIUS) - f(LIMBUS_RADIUS - h)) / h;
    assert!(
        base_slope.abs() < 1e-3,
        "base slope should vanish, got {base_slope}"
    );
}

#[test]
fn sphere_builder_produces_unit_directions_on_radius() {
    let mesh = build_sphere(2.0, 16, 16);
    assert_eq!(mesh.positions.len(), 17 * 17);
    assert_eq!(mesh.indices.len(), 16 * 16 * 6);
    for (pos, dir) in mesh.positions.iter().zip(mesh.dirs.iter()) {
        assert!((pos.length() - 2.0).abs() < 1e-5, "off-radius: {pos:?}");
        assert!((dir.length() - 1.0).abs() < 1e-5, "dir not unit: {dir:?}");
    }
    for &i in &mesh.indices {
        assert!((i as usize) < mesh.positions.len(), "index out of range");
    }
}

#[test]
fn inner_shell_untouched_outside_the_iris_cap() {
    let mesh = build_inner_shell();
    for (pos, dir) in mesh.positions.iter().zip(mesh.dirs.iter()) {
        let r = (dir.x * dir.x + dir.y * dir.y).sqrt();
        if dir.z <= 0.0 || r >= IRIS_RADIUS {
            assert!(
                (pos.length() - 1.0).abs() < 1e-6,
                "sclera vertex moved: {pos:?}"
            );
        }
    }
}

#[test]
fn inner_shell_bowl_is_concave_with_analytic_normals() {
    let mesh = build_inner_shell();
    let mut displaced = 0;
    for ((pos, dir), normal) in mesh
        .positions
        .iter()
        .zip(mesh.dirs.iter())
        .zip(mesh.normals.iter())
    {
        let r = (dir.x * dir.x + dir.y * dir.y).sqrt();
        if dir.z > 0.0 && r < IRIS_RADIUS - 1e-3 {
            displaced += 1;
            assert!(pos.z < dir.z, "bowl vertex not recessed: {pos:?}");
            let expected = iris_bowl_normal(pos.x, pos.y);
            assert!(
                (*normal - expected).length() < 1e-6,
                "bowl normal not analytic at {pos:?}"
            );
        }
    }
    assert!(displaced > 100, "iris cap unexpectedly sparse: {displaced}");
}

#[test]
fn cornea_normals_are_rebuilt_and_unit_length() {
    let mesh = build_cornea_shell();
    for normal in &mesh.normals {
        let len = normal.length();
        assert!(len > 0.5, "degenerate cornea normal");
        assert!((len - 1.0).abs() < 1e-3, "cornea normal not unit: {len}");
    }
    // The bulge apex faces straight forward.
    let apex = mesh
        .positions
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.z.total_cmp(&b.z))
        .map(|(i, _)| i)
        .unwrap();
    assert!(
        mesh.normals[apex].z > 0.99,
        "apex normal tilted: {:?}",
        mesh.normals[apex]
    );
}

#[test]
fn recompute_vertex_normals_on_a_flat_triangle() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let normals = recompute_vertex_normals(&positions, &[0, 1, 2]);
    for n in normals {
        assert!((n - Vec3::Z).length() < 1e-6, "expected +Z, got {n:?}");
    }
}
