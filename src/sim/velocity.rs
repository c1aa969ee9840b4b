//! Initial velocities
//!
//! Speed is inversely related to size so larger disks read as heavier.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Disk, positive};
use crate::consts::*;
use crate::error::ConfigError;

/// Velocity sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityConfig {
    /// Uniform sample range per component
    pub min: f64,
    pub max: f64,
    /// Multiplier on the largest radius; above 1.0 keeps the largest disk moving
    pub inertia_factor: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            min: -VELOCITY_RANGE,
            max: VELOCITY_RANGE,
            inertia_factor: INERTIA_FACTOR,
        }
    }
}

impl VelocityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The sampler also needs a finite span
        if !(self.max - self.min).is_finite() || self.min > self.max {
            return Err(ConfigError::VelocityRange {
                min: self.min,
                max: self.max,
            });
        }
        positive("inertia_factor", self.inertia_factor)
    }

    /// Velocity scale for a disk of radius `r` given the largest radius `rmax`
    #[inline]
    pub fn scale(&self, rmax: f64, r: f64) -> f64 {
        self.inertia_factor * rmax - r
    }
}

/// Largest radius in `disks` (0.0 if empty)
pub fn max_radius(disks: &[Disk]) -> f64 {
    disks.iter().map(|d| d.radius).fold(0.0, f64::max)
}

/// Draw `(ux, uy)` per disk in index order and scale by `1.2 * rmax - r`
pub fn assign_velocities<R: Rng + ?Sized>(
    disks: &mut [Disk],
    config: &VelocityConfig,
    rng: &mut R,
) -> Result<(), ConfigError> {
    config.validate()?;
    let rmax = max_radius(disks);

    for disk in disks.iter_mut() {
        let scale = config.scale(rmax, disk.radius);
        let ux: f64 = rng.random_range(config.min..=config.max);
        let uy: f64 = rng.random_range(config.min..=config.max);
        disk.vel.x = scale * ux;
        disk.vel.y = scale * uy;
    }

    Ok(())
}

/// One-time visual scale-down applied after velocities are assigned
pub fn halve_radii(disks: &mut [Disk]) {
    for disk in disks.iter_mut() {
        disk.radius /= 2.0;
    }
}
