//! Per-frame gaze-orientation state machine.
//!
//! Each frame the active mode produces a target (yaw, pitch) and a
//! smoothing factor, and the smoothed orientation moves toward the target
//! by `current = lerp(current, target, k)` per axis. Saccade mode keeps a
//! small schedule of jump times; every other mode is a pure function of the
//! clock (and, for mouse mode, the pointer).

use glam::Vec2;
use rand::prelude::*;

use crate::constants::{GAZE_PITCH_LIMIT, GAZE_YAW_LIMIT};
use crate::math::lerp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GazeMode {
    /// Track the pointer, mapped to +/- 45 degrees on each axis.
    Mouse,
    /// Slow layered drift.
    Calm,
    /// Fixation pauses broken by rapid jumps.
    Saccades,
    /// Horizontal sweep, as if reading the room.
    Scanning,
}

/// Which saccade branch fired on a given update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaccadeKind {
    Macro,
    Micro,
}

/// Scheduled-jump state; mutated only inside the saccade rule and only
/// meaningful while the controller is in saccade mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct SaccadeState {
    pub next_move_time: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
}

pub struct GazeController {
    mode: GazeMode,
    yaw: f32,
    pitch: f32,
    saccade: SaccadeState,
    rng: StdRng,
}

impl GazeController {
    /// Seeded constructor; independent eyes derive distinct seeds from a
    /// shared base so runs stay reproducible.
    pub fn new(mode: GazeMode, seed: u64) -> Self {
        Self {
            mode,
            yaw: 0.0,
            pitch: 0.0,
            saccade: SaccadeState::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> GazeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GazeMode) {
        if self.mode != mode {
            log::debug!("[gaze] mode -> {:?}", mode);
            self.mode = mode;
        }
    }

    /// Smoothed orientation as (yaw, pitch) in radians.
    pub fn orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    pub fn saccade(&self) -> &SaccadeState {
        &self.saccade
    }

    /// One per-frame step: compute the active mode's target and smoothing
    /// factor, then move the smoothed orientation toward it.
    pub fn update(&mut self, t: f32, pointer: Vec2) {
        let (target_yaw, target_pitch, k) = match self.mode {
            GazeMode::Mouse => (
                pointer.x * std::f32::consts::FRAC_PI_4,
                pointer.y * std::f32::consts::FRAC_PI_4,
                0.08,
            ),
            GazeMode::Calm => (
                (t * 0.5).sin() * 0.15 + (t * 0.2).sin() * 0.1,
                (t * 0.4).cos() * 0.1 + (t * 0.1).sin() * 0.05,
                0.02,
            ),
            GazeMode::Saccades => {
                self.step_saccade(t);
                // Fast snap approximates the near-instant real saccade.
                (self.saccade.target_yaw, self.saccade.target_pitch, 0.4)
            }
            GazeMode::Scanning => ((t * 1.2).sin() * 0.5, (t * 0.5).sin() * 0.1, 0.05),
        };
        self.yaw = lerp(self.yaw, target_yaw, k);
        self.pitch = lerp(self.pitch, target_pitch, k);
    }

    /// Advance the saccade schedule. While `t` has not reached the next
    /// scheduled move the previous target holds. Otherwise: 20% chance of a
    /// macro dart to a fresh target, else a micro jitter around the current
    /// one; both clamped to the socket limits, then the next move is
    /// scheduled (macro pauses 0.5-1.5 s, micro 0.05-0.25 s). Returns the
    /// branch taken if a jump fired.
    pub fn step_saccade(&mut self, t: f32) -> Option<SaccadeKind> {
        if t <= self.saccade.next_move_time {
            return None;
        }
        let kind = if self.rng.gen::<f32>() < 0.2 {
            SaccadeKind::Macro
        } else {
            SaccadeKind::Micro
        };
        match kind {
            SaccadeKind::Macro => {
                self.saccade.target_yaw = self.rng.gen_range(-0.6..=0.6);
                self.saccade.target_pitch = self.rng.gen_range(-0.4..=0.4);
            }
            SaccadeKind::Micro => {
                self.saccade.target_yaw += self.rng.gen_range(-0.1..=0.1);
                self.saccade.target_pitch += self.rng.gen_range(-0.1..=0.1);
            }
        }
        self.saccade.target_yaw = self
            .saccade
            .target_yaw
            .clamp(-GAZE_YAW_LIMIT, GAZE_YAW_LIMIT);
        self.saccade.target_pitch = self
            .saccade
            .target_pitch
            .clamp(-GAZE_PITCH_LIMIT, GAZE_PITCH_LIMIT);
        let pause = match kind {
            SaccadeKind::Macro => self.rng.gen_range(0.5..1.5),
            SaccadeKind::Micro => self.rng.gen_range(0.05..0.25),
        };
        self.saccade.next_move_time = t + pause;
        Some(kind)
    }
}
