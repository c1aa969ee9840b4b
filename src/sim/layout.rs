//! Initial emblem layout
//!
//! Disks are arranged as a stack of coincident core disks at the anchor,
//! surrounded by rings of evenly spaced disks.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{Color, Disk, positive};
use crate::consts::*;
use crate::error::ConfigError;
use crate::polar_to_cartesian;

/// One disk of the central stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreDisk {
    pub radius: f64,
    pub color: Color,
}

/// A ring of identical disks around the anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub count: usize,
    /// Distance of each disk center from the anchor
    pub ring_radius: f64,
    pub disk_radius: f64,
    pub color: Color,
    /// Angular offset in sectors (0.5 = half a sector)
    #[serde(default)]
    pub phase: f64,
}

impl RingSpec {
    /// Angle of the `j`-th disk of this ring (radians)
    pub fn angle(&self, j: usize) -> f64 {
        (self.phase + j as f64) * TAU / self.count as f64
    }
}

/// Full emblem layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub anchor: DVec2,
    /// Coincident disks at the anchor, drawn in order
    pub core: Vec<CoreDisk>,
    pub rings: Vec<RingSpec>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let core = [
            (120.0, "#221616"),
            (95.0, "#F1D039"),
            (66.0, "#491311"),
            (35.0, "#B46B36"),
        ]
        .into_iter()
        .map(|(radius, color)| CoreDisk {
            radius,
            color: Color::new(color),
        })
        .collect();

        Self {
            anchor: DVec2::new(ANCHOR_X, ANCHOR_Y),
            core,
            rings: vec![
                RingSpec {
                    count: 10,
                    ring_radius: 32.5,
                    disk_radius: 15.0,
                    color: Color::new("#708033"),
                    phase: 0.0,
                },
                RingSpec {
                    count: 7,
                    ring_radius: 57.5,
                    disk_radius: 25.0,
                    color: Color::new("#E85129"),
                    phase: 0.0,
                },
                RingSpec {
                    count: 7,
                    ring_radius: 60.0,
                    disk_radius: 12.5,
                    color: Color::new("#BA3B1D"),
                    phase: 0.5,
                },
            ],
        }
    }
}

impl LayoutConfig {
    /// Total number of disks this layout produces
    pub fn disk_count(&self) -> usize {
        self.core.len() + self.rings.iter().map(|r| r.count).sum::<usize>()
    }
}

/// Place every disk of `config` at rest, core disks first, then each ring
pub fn build_layout(config: &LayoutConfig) -> Result<Vec<Disk>, ConfigError> {
    if config.disk_count() == 0 {
        return Err(ConfigError::EmptyLayout);
    }

    let mut disks = Vec::with_capacity(config.disk_count());

    for stacked in &config.core {
        positive("core disk radius", stacked.radius)?;
        disks.push(Disk::new(
            config.anchor,
            DVec2::ZERO,
            stacked.radius,
            stacked.color.clone(),
        ));
    }

    for (ring_index, ring) in config.rings.iter().enumerate() {
        if ring.count == 0 {
            return Err(ConfigError::EmptyRing { ring: ring_index });
        }
        positive("ring disk radius", ring.disk_radius)?;
        if !(ring.ring_radius.is_finite() && ring.ring_radius >= 0.0) {
            return Err(ConfigError::NotPositive {
                name: "ring radius",
                value: ring.ring_radius,
            });
        }

        for j in 0..ring.count {
            let pos = polar_to_cartesian(config.anchor, ring.ring_radius, ring.angle(j));
            disks.push(Disk::new(pos, DVec2::ZERO, ring.disk_radius, ring.color.clone()));
        }
    }

    Ok(disks)
}
