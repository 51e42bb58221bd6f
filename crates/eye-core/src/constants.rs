// Shared shape and shading constants for the two eyeball shells.
// These are contract values: the shading layers composite against the same
// radii the geometry is displaced with.

// Inner shell (sclera/iris carrier)
pub const INNER_SHELL_RADIUS: f32 = 1.0;
pub const INNER_SEGMENTS: u32 = 128;
pub const IRIS_RADIUS: f32 = 0.46; // radial extent of the iris cap
pub const IRIS_BOWL_DEPTH: f32 = 0.2; // concave displacement at the iris center

// Outer shell (cornea)
pub const CORNEA_RADIUS: f32 = 1.01;
pub const CORNEA_SEGMENTS: u32 = 256; // fine enough for stable vertex normals
pub const LIMBUS_RADIUS: f32 = 0.55; // radial extent of the corneal bulge
pub const CORNEA_BULGE: f32 = 0.06; // dome height at the apex

// Shading
pub const SOCKET_CUTOFF: f32 = -0.2; // back-cap exclusion threshold on local z
pub const PUPIL_SCALLOP: f32 = 0.015; // amplitude of the ragged pupil edge

// Pupil radius window; keeps radius segmentation away from degenerate bands
pub const PUPIL_MIN: f32 = 0.02;
pub const PUPIL_MAX: f32 = 0.45;

// Gaze excursion limits (radians); stops the eye rolling back into the head
pub const GAZE_YAW_LIMIT: f32 = 0.8;
pub const GAZE_PITCH_LIMIT: f32 = 0.5;

// Iris color pairs cycled by the front-end, inner then outer (0xRRGGBB)
pub const IRIS_PRESETS: [[u32; 2]; 4] = [
    [0x1e3a8a, 0x3b82f6], // deep blue
    [0x14532d, 0x4ade80], // green
    [0x451a03, 0x92400e], // brown
    [0x1f2937, 0x94a3b8], // grey
];
