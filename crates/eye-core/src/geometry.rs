//! Mesh construction and the two shell deformations.
//!
//! Both shells are UV spheres sharing a common center and orientation. The
//! inner shell gets a concave iris bowl with analytically recomputed
//! normals; the outer shell gets a Hermite corneal bulge with normals
//! rebuilt from the displaced triangles. Displacement is a pure function of
//! the undisplaced local position and the fixed shape constants, so all
//! geometry is built once at startup and reused every frame.

use glam::Vec3;

use crate::constants::{
    CORNEA_BULGE, CORNEA_RADIUS, CORNEA_SEGMENTS, INNER_SEGMENTS, INNER_SHELL_RADIUS,
    IRIS_BOWL_DEPTH, IRIS_RADIUS, LIMBUS_RADIUS,
};

/// Interleaved vertex as uploaded to the GPU. `dir` is the undisplaced unit
/// direction of the vertex; the fragment stage shades against it so the
/// displaced bowl still samples the same spherical noise fields.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShellVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub dir: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Undisplaced unit directions, captured at sphere-build time.
    pub dirs: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertices(&self) -> Vec<ShellVertex> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .zip(self.dirs.iter())
            .map(|((p, n), d)| ShellVertex {
                position: p.to_array(),
                normal: n.to_array(),
                dir: d.to_array(),
            })
            .collect()
    }
}

/// UV sphere with poles on the Y axis, `segments` around and `rings` down.
pub fn build_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let vert_count = ((rings + 1) * (segments + 1)) as usize;
    let mut positions = Vec::with_capacity(vert_count);
    let mut normals = Vec::with_capacity(vert_count);
    let mut dirs = Vec::with_capacity(vert_count);
    for ring in 0..=rings {
        let theta = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let phi = std::f32::consts::TAU * seg as f32 / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let dir = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            positions.push(dir * radius);
            normals.push(dir);
            dirs.push(dir);
        }
    }
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * (segments + 1) + seg;
            let b = a + segments + 1;
            // CCW seen from outside the sphere
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    MeshData {
        positions,
        normals,
        dirs,
        indices,
    }
}

#[inline]
fn radial(x: f32, y: f32) -> f32 {
    (x * x + y * y).sqrt()
}

/// Concave iris-bowl displacement for an inner-shell vertex: a parabolic
/// bowl over the front iris cap. Returns the signed z offset (negative
/// inside the cap, zero elsewhere).
pub fn iris_bowl_offset(x: f32, y: f32, z: f32) -> f32 {
    let r = radial(x, y);
    if z <= 0.0 || r >= IRIS_RADIUS {
        return 0.0;
    }
    let bowl = 1.0 - (r / IRIS_RADIUS) * (r / IRIS_RADIUS);
    -bowl * IRIS_BOWL_DEPTH
}

/// Analytic normal of the displaced bowl surface. Recomputing from the bowl
/// partial derivatives keeps the iris shading smooth at any tessellation;
/// averaging coarse mesh faces would facet it.
pub fn iris_bowl_normal(x: f32, y: f32) -> Vec3 {
    let dzdx = 2.0 * IRIS_BOWL_DEPTH * x / (IRIS_RADIUS * IRIS_RADIUS);
    let dzdy = 2.0 * IRIS_BOWL_DEPTH * y / (IRIS_RADIUS * IRIS_RADIUS);
    Vec3::new(-dzdx, -dzdy, 1.0).normalize()
}

/// Corneal bulge for an outer-shell vertex: cubic Hermite profile
/// `2t^3 - 3t^2 + 1` with zero derivative at both the apex (r = 0) and the
/// base ring (r = limbus), so the dome meets the sphere without a sharp tip
/// or seam in the reflection normals. Returns the signed z offset.
pub fn cornea_bulge_offset(x: f32, y: f32, z: f32) -> f32 {
    let r = radial(x, y);
    if z <= 0.0 || r >= LIMBUS_RADIUS {
        return 0.0;
    }
    let t = r / LIMBUS_RADIUS;
    let f = 2.0 * t * t * t - 3.0 * t * t + 1.0;
    f * CORNEA_BULGE
}

/// Apply the iris bowl to an inner-shell mesh, replacing normals inside the
/// cap with the analytic bowl normal.
pub fn displace_inner_shell(mesh: &mut MeshData) {
    for (pos, normal) in mesh.positions.iter_mut().zip(mesh.normals.iter_mut()) {
        if pos.z > 0.0 && radial(pos.x, pos.y) < IRIS_RADIUS {
            pos.z += iris_bowl_offset(pos.x, pos.y, pos.z);
            *normal = iris_bowl_normal(pos.x, pos.y);
        }
    }
}

/// Apply the corneal bulge, then rebuild all vertex normals from the
/// displaced triangles. At this tessellation the averaged normals are
/// numerically stable, so no analytic form is needed.
pub fn displace_cornea(mesh: &mut MeshData) {
    for pos in mesh.positions.iter_mut() {
        pos.z += cornea_bulge_offset(pos.x, pos.y, pos.z);
    }
    mesh.normals = recompute_vertex_normals(&mesh.positions, &mesh.indices);
}

/// Area-weighted vertex normals accumulated from triangle cross products.
pub fn recompute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for n in normals.iter_mut() {
        *n = n.normalize_or_zero();
    }
    normals
}

/// Inner (sclera/iris) shell: unit sphere with the concave iris bowl.
pub fn build_inner_shell() -> MeshData {
    let mut mesh = build_sphere(INNER_SHELL_RADIUS, INNER_SEGMENTS, INNER_SEGMENTS);
    displace_inner_shell(&mut mesh);
    mesh
}

/// Outer cornea shell with its Hermite bulge. Static geometry, built once.
pub fn build_cornea_shell() -> MeshData {
    let mut mesh = build_sphere(CORNEA_RADIUS, CORNEA_SEGMENTS, CORNEA_SEGMENTS);
    displace_cornea(&mut mesh);
    mesh
}
