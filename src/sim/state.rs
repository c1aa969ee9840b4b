//! Disk system state and core simulation types
//!
//! The system owns every disk exclusively. Count, radii, colors, bounds and
//! `dt` are fixed once constructed; only positions and velocities change.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::build_layout;
use super::tick::BoundaryPolicy;
use super::velocity::{assign_velocities, halve_radii};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Opaque style token, passed through to rendering untouched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single disk
#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    pub pos: DVec2,
    pub vel: DVec2,
    pub(crate) radius: f64,
    pub(crate) color: Color,
}

impl Disk {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, color: Color) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> &Color {
        &self.color
    }
}

/// Per-frame snapshot record handed to the vector writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskRecord<'a> {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'a Color,
}

/// Axis-aligned frame with an inset reflecting boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: BOX_WIDTH,
            height: BOX_HEIGHT,
            margin: BOX_MARGIN,
        }
    }
}

impl Bounds {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        if !self.margin.is_finite()
            || self.margin < 0.0
            || 2.0 * self.margin >= self.width
            || 2.0 * self.margin >= self.height
        {
            return Err(ConfigError::Margin {
                margin: self.margin,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Reflecting limits along x: `(margin, width - margin)`
    pub fn x_limits(&self) -> (f64, f64) {
        (self.margin, self.width - self.margin)
    }

    /// Reflecting limits along y: `(margin, height - margin)`
    pub fn y_limits(&self) -> (f64, f64) {
        (self.margin, self.height - self.margin)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// The simulated collection of disks
#[derive(Debug, Clone)]
pub struct DiskSystem {
    /// Seed the initial velocities were drawn with (if built from settings)
    pub seed: Option<u64>,
    /// Steps taken so far
    pub step_count: u64,
    pub(crate) disks: Vec<Disk>,
    bounds: Bounds,
    dt: f64,
    policy: BoundaryPolicy,
}

impl DiskSystem {
    /// Build a system from explicit disks, validating the fixed parameters
    pub fn new(disks: Vec<Disk>, bounds: Bounds, dt: f64) -> Result<Self, ConfigError> {
        bounds.validate()?;
        positive("dt", dt)?;
        if disks.is_empty() {
            return Err(ConfigError::EmptyLayout);
        }
        if let Some((index, disk)) = disks
            .iter()
            .enumerate()
            .find(|(_, d)| !(d.radius.is_finite() && d.radius > 0.0))
        {
            return Err(ConfigError::DiskRadius {
                index,
                radius: disk.radius,
            });
        }

        Ok(Self {
            seed: None,
            step_count: 0,
            disks,
            bounds,
            dt,
            policy: BoundaryPolicy::default(),
        })
    }

    /// Build the configured layout with randomized velocities from `rng`
    pub fn from_settings<R: Rng + ?Sized>(
        settings: &Settings,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut disks = build_layout(&settings.layout)?;
        assign_velocities(&mut disks, &settings.velocity, rng)?;
        halve_radii(&mut disks);

        let system = Self::new(disks, settings.bounds, settings.dt)?;
        Ok(system.with_policy(settings.boundary_policy))
    }

    /// Build from settings with a seeded PCG generator
    pub fn seeded(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut system = Self::from_settings(settings, &mut rng)?;
        system.seed = Some(seed);
        Ok(system)
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Snapshot of every disk in index order
    pub fn records(&self) -> impl Iterator<Item = DiskRecord<'_>> {
        self.disks.iter().map(|d| DiskRecord {
            x: d.pos.x,
            y: d.pos.y,
            radius: d.radius,
            color: &d.color,
        })
    }
}
