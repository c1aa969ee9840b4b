//! Rasterization seam
//!
//! Callers only see `Rasterizer`; the external tool and its argument syntax
//! stay inside the implementation.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::RasterError;

/// Converts one vector artifact to one raster artifact
pub trait Rasterizer {
    fn rasterize(&mut self, vector: &Path, raster: &Path) -> Result<(), RasterError>;
}

/// External converter parameters (ImageMagick `convert` style)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    pub program: String,
    pub density: u32,
    pub quality: u32,
    /// Flatten transparency onto the background
    pub flatten: bool,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            program: RASTER_PROGRAM.to_string(),
            density: RASTER_DENSITY,
            quality: RASTER_QUALITY,
            flatten: true,
        }
    }
}

/// Runs the external converter once per frame and checks its exit status
#[derive(Debug, Clone)]
pub struct ConvertRasterizer {
    settings: ConvertSettings,
}

impl ConvertRasterizer {
    pub fn new(settings: ConvertSettings) -> Self {
        Self { settings }
    }

    /// Build the converter invocation for one frame
    pub fn command(&self, vector: &Path, raster: &Path) -> Command {
        let mut cmd = Command::new(&self.settings.program);
        cmd.arg("-density").arg(self.settings.density.to_string());
        if self.settings.flatten {
            cmd.arg("-flatten");
        }
        cmd.arg("-quality")
            .arg(self.settings.quality.to_string())
            .arg(vector)
            .arg(raster);
        cmd
    }
}

impl Rasterizer for ConvertRasterizer {
    fn rasterize(&mut self, vector: &Path, raster: &Path) -> Result<(), RasterError> {
        let output = self
            .command(vector, raster)
            .output()
            .map_err(|source| RasterError::Spawn {
                program: self.settings.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                log::error!("{}: {}", self.settings.program, stderr.trim());
            }
            return Err(RasterError::Status {
                program: self.settings.program.clone(),
                status: output.status,
            });
        }
        Ok(())
    }
}

/// Vector-only runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRasterizer;

impl Rasterizer for NoopRasterizer {
    fn rasterize(&mut self, _vector: &Path, _raster: &Path) -> Result<(), RasterError> {
        Ok(())
    }
}
