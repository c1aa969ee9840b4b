//! Run settings
//!
//! Defaults reproduce the stock logo animation. Any subset can be overridden
//! from a JSON file; missing fields keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::{ConvertSettings, SvgStyle};
use crate::sequencer::{FramePlan, OutputLayout};
use crate::sim::state::positive;
use crate::sim::{BoundaryPolicy, Bounds, LayoutConfig, VelocityConfig, build_layout};

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    pub layout: LayoutConfig,
    pub bounds: Bounds,
    /// Fixed timestep
    pub dt: f64,
    pub velocity: VelocityConfig,
    pub boundary_policy: BoundaryPolicy,
    /// Velocity seed; drawn from entropy when absent
    pub seed: Option<u64>,

    // === Frames ===
    pub frames: FramePlan,
    pub output: OutputLayout,

    // === Rendering ===
    pub style: SvgStyle,
    pub raster: ConvertSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            bounds: Bounds::default(),
            dt: SIM_DT,
            velocity: VelocityConfig::default(),
            boundary_policy: BoundaryPolicy::default(),
            seed: None,

            frames: FramePlan::default(),
            output: OutputLayout::default(),

            style: SvgStyle::default(),
            raster: ConvertSettings::default(),
        }
    }
}

impl Settings {
    /// Check every fatal configuration error up front
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        positive("dt", self.dt)?;
        self.velocity.validate()?;
        self.frames.validate()?;
        build_layout(&self.layout)?;
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Pretty JSON form of these settings
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
