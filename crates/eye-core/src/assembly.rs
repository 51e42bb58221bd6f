//! One renderable eye: two concentric shells sharing a smoothed
//! orientation, procedural shading on the inner shell, and the cornea mask
//! on the outer one.

use glam::{Vec2, Vec3};

use crate::gaze::GazeController;
use crate::geometry::{build_cornea_shell, build_inner_shell, MeshData};
use crate::pupil::effective_pupil_radius;
use crate::shading;
use crate::state::{EyeConfig, EyeSide, EyeState};

pub struct EyeAssembly {
    pub side: EyeSide,
    state: EyeState,
    gaze: GazeController,
}

impl EyeAssembly {
    pub fn new(config: EyeConfig, side: EyeSide, seed: u64) -> Self {
        let config = config.clamped();
        Self {
            side,
            gaze: GazeController::new(config.gaze_mode, seed),
            state: EyeState {
                pupil_radius: config.pupil_size,
                config,
            },
        }
    }

    pub fn config(&self) -> &EyeConfig {
        &self.state.config
    }

    /// Replace configuration at a frame boundary. Clamping happens here so
    /// the per-frame path stays branch-free.
    pub fn set_config(&mut self, config: EyeConfig) {
        let config = config.clamped();
        self.gaze.set_mode(config.gaze_mode);
        self.state.config = config;
    }

    /// Advance one frame: gaze smoothing, then pupil dynamics. The whole
    /// step is a function of the previous state plus (t, pointer), so a
    /// skipped or aborted frame leaves no torn state behind.
    pub fn advance(&mut self, t: f32, pointer: Vec2) {
        self.gaze.update(t, pointer);
        self.state.pupil_radius = effective_pupil_radius(self.state.config.pupil_size, t);
    }

    /// Smoothed orientation with the side mirror applied: the right eye
    /// negates yaw so the pair appears to track one point without sharing
    /// any mutable state.
    pub fn orientation(&self) -> (f32, f32) {
        let (yaw, pitch) = self.gaze.orientation();
        match self.side {
            EyeSide::Left => (yaw, pitch),
            EyeSide::Right => (-yaw, pitch),
        }
    }

    pub fn pupil_radius(&self) -> f32 {
        self.state.pupil_radius
    }

    pub fn gaze(&self) -> &GazeController {
        &self.gaze
    }

    /// Surface color for a normalized inner-shell direction.
    pub fn shade(&self, p: Vec3) -> Vec3 {
        shading::shade(
            p,
            self.state.pupil_radius,
            self.state.config.iris_color1,
            self.state.config.iris_color2,
        )
    }

    /// Cornea alpha/reflection mask for a local point at a world height.
    pub fn cornea_mask(&self, local: Vec3, world_y: f32) -> f32 {
        shading::cornea_mask(local, world_y)
    }
}

/// Both displaced shells. Geometry is orientation-independent and identical
/// across eyes, so one set can be shared by the pair.
pub struct ShellMeshes {
    pub inner: MeshData,
    pub cornea: MeshData,
}

pub fn build_shells() -> ShellMeshes {
    ShellMeshes {
        inner: build_inner_shell(),
        cornea: build_cornea_shell(),
    }
}
