pub mod assembly;
pub mod constants;
pub mod gaze;
pub mod geometry;
pub mod math;
pub mod noise;
pub mod pupil;
pub mod shading;
pub mod state;

pub static EYE_WGSL: &str = include_str!("../shaders/eye.wgsl");

pub use assembly::*;
pub use constants::*;
pub use gaze::*;
pub use geometry::*;
pub use noise::*;
pub use pupil::*;
pub use shading::*;
pub use state::*;
