//! Error types
//!
//! Configuration problems are fatal at construction. Once a `DiskSystem`
//! exists the simulation itself cannot fail; only frame output can.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Invalid run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("disk {index} has non-positive radius {radius}")]
    DiskRadius { index: usize, radius: f64 },

    #[error("margin {margin} leaves no interior in a {width}x{height} box")]
    Margin { margin: f64, width: f64, height: f64 },

    #[error("ring {ring} has no disks")]
    EmptyRing { ring: usize },

    #[error("layout contains no disks")]
    EmptyLayout,

    #[error("velocity range [{min}, {max}] is empty or non-finite")]
    VelocityRange { min: f64, max: f64 },

    #[error("motion_frames must be at least 2 to render a frame, got {0}")]
    TooFewFrames(u32),

    #[error("frame budget {motion} + {static_hold} + {text} does not fit in u32")]
    FrameBudget { motion: u32, static_hold: u32, text: u32 },

    #[error("failed to read settings from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// External rasterization failure
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("could not launch rasterizer `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rasterizer `{program}` exited with {status}")]
    Status { program: String, status: ExitStatus },
}

/// Frame sequence failure; the run halts at the first one
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("failed to create output directory {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("frame {frame}: failed to write {path}")]
    Write {
        frame: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("frame {frame}: rasterization failed")]
    Raster {
        frame: u32,
        #[source]
        source: RasterError,
    },
}
