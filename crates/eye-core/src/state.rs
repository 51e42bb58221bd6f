//! Configuration and per-eye state types shared with the front-ends.
//!
//! These types intentionally avoid referencing platform-specific APIs: the
//! embedding application owns the clock, the pointer, and the render
//! surface, and feeds them in at the frame boundary.

use glam::Vec3;

use crate::gaze::GazeMode;

/// Coarse lighting-environment switch. Consumed by the rendering surface
/// when it picks a fallback environment; the shading math never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightingMode {
    /// Graded dome with bright window catchlights.
    Studio,
    /// Dim constant dome.
    Flat,
}

/// sRGB hex triplet (0xRRGGBB) to float color in [0, 1].
pub fn color_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Shared immutable configuration for an eye pair. May be replaced at any
/// frame boundary; [`EyeConfig::clamped`] runs at that boundary so the
/// per-pixel path never branches on out-of-range values.
#[derive(Clone, Copy, Debug)]
pub struct EyeConfig {
    pub iris_color1: Vec3,
    pub iris_color2: Vec3,
    /// Index of refraction of the cornea shell, 1.0-2.0.
    pub ior: f32,
    /// Cornea shell thickness, 0-1.
    pub thickness: f32,
    /// Reflection/environment intensity on the cornea, 0-10.
    pub reflection_intensity: f32,
    /// Base pupil radius before hippus, 0.05-0.35.
    pub pupil_size: f32,
    pub gaze_mode: GazeMode,
    pub lighting: LightingMode,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            iris_color1: color_from_hex(0x1e3a8a),
            iris_color2: color_from_hex(0x3b82f6),
            ior: 1.376,
            thickness: 0.1,
            reflection_intensity: 1.5,
            pupil_size: 0.15,
            gaze_mode: GazeMode::Mouse,
            lighting: LightingMode::Studio,
        }
    }
}

impl EyeConfig {
    /// Clamp every numeric field to its documented range.
    pub fn clamped(mut self) -> Self {
        self.ior = self.ior.clamp(1.0, 2.0);
        self.thickness = self.thickness.clamp(0.0, 1.0);
        self.reflection_intensity = self.reflection_intensity.clamp(0.0, 10.0);
        self.pupil_size = self.pupil_size.clamp(0.05, 0.35);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeSide {
    Left,
    Right,
}

/// Static mount transform for one eye in head space. Rotation is Euler XYZ
/// in radians.
#[derive(Clone, Copy, Debug)]
pub struct EyeMount {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for EyeMount {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 0.02),
            rotation: Vec3::ZERO,
            scale: 0.85,
        }
    }
}

impl EyeMount {
    /// Right-eye mirror: position.x, rotation.y and rotation.z negate while
    /// rotation.x is kept. The asymmetry is a fixed, tested contract; do
    /// not "correct" it to full symmetry.
    pub fn mirrored(self) -> Self {
        Self {
            position: Vec3::new(-self.position.x, self.position.y, self.position.z),
            rotation: Vec3::new(self.rotation.x, -self.rotation.y, -self.rotation.z),
            scale: self.scale,
        }
    }

    pub fn for_side(self, side: EyeSide) -> Self {
        match side {
            EyeSide::Left => self,
            EyeSide::Right => self.mirrored(),
        }
    }
}

/// Mutable per-eye state, advanced once per rendered frame and owned
/// exclusively by its [`crate::assembly::EyeAssembly`].
#[derive(Clone, Copy, Debug)]
pub struct EyeState {
    pub config: EyeConfig,
    /// Current hippus-modulated, clamped pupil radius.
    pub pupil_radius: f32,
}
