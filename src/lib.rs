//! Logo Bounce - bouncing-disk logo animation
//!
//! Core modules:
//! - `sim`: Deterministic disk simulation (layout, velocities, wall reflection)
//! - `renderer`: SVG frame serialization and the rasterization seam
//! - `sequencer`: Frame loop and forward/reversed output routing
//! - `settings`: Data-driven run configuration
//! - `error`: Error types

pub mod error;
pub mod renderer;
pub mod sequencer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, RasterError, SequenceError};
pub use sequencer::{FramePlan, FrameSequencer, RunSummary};
pub use settings::Settings;

use glam::DVec2;

/// Default configuration constants
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 0.004;

    /// Bounding box dimensions
    pub const BOX_WIDTH: f64 = 600.0;
    pub const BOX_HEIGHT: f64 = 200.0;
    /// Inset of the reflecting boundary from the visible frame
    pub const BOX_MARGIN: f64 = 4.0;

    /// Common center of all rings
    pub const ANCHOR_X: f64 = 100.0;
    pub const ANCHOR_Y: f64 = 100.0;

    /// Uniform velocity sample range (symmetric)
    pub const VELOCITY_RANGE: f64 = 10.0;
    /// Scale applied to the largest radius so the biggest disk still moves
    pub const INERTIA_FACTOR: f64 = 1.2;

    /// Frame phases (30 fps)
    pub const MOTION_FRAMES: u32 = 360;
    pub const STATIC_FRAMES: u32 = 15; // 0.5 s
    pub const TEXT_FRAMES: u32 = 75; // 2.5 s

    /// Rasterizer defaults
    pub const RASTER_PROGRAM: &str = "convert";
    pub const RASTER_DENSITY: u32 = 100;
    pub const RASTER_QUALITY: u32 = 100;

    /// Boundary line stroke, `rgb(10%, 10%, 16%)`
    pub const BOUNDARY_STROKE: &str = "rgb(10%,10%,16%)";
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, theta: f64) -> DVec2 {
    center + DVec2::new(r * theta.cos(), r * theta.sin())
}
