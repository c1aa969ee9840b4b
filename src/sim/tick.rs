//! Fixed timestep simulation step
//!
//! Move every disk, then reflect any velocity component whose wall the disk
//! now crosses. The check uses the already-moved position.

use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_wall, reflect_axis, wall_contact};
use super::state::DiskSystem;

/// What happens to a disk that crosses a wall during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Negate the velocity component and leave the overshoot in place
    #[default]
    ReflectAfterMove,
    /// Pull the disk back onto the wall, then negate
    Clamp,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::ReflectAfterMove => "reflect",
            BoundaryPolicy::Clamp => "clamp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reflect" | "reflect_after_move" => Some(BoundaryPolicy::ReflectAfterMove),
            "clamp" => Some(BoundaryPolicy::Clamp),
            _ => None,
        }
    }
}

/// Wall reflections performed during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub x_flips: usize,
    pub y_flips: usize,
}

impl StepReport {
    pub fn total(&self) -> usize {
        self.x_flips + self.y_flips
    }
}

/// Advance the system by one fixed timestep
pub fn step(system: &mut DiskSystem) -> StepReport {
    let dt = system.dt();
    let bounds = system.bounds();
    let policy = system.policy();
    let mut report = StepReport::default();

    for disk in system.disks.iter_mut() {
        disk.pos += dt * disk.vel;

        let contact = wall_contact(disk.pos, disk.radius, &bounds);
        if let Some(side) = contact.x {
            if policy == BoundaryPolicy::Clamp {
                disk.pos.x = clamp_to_wall(disk.radius, side, bounds.x_limits());
            }
            disk.vel.x = reflect_axis(disk.vel.x);
            report.x_flips += 1;
        }
        if let Some(side) = contact.y {
            if policy == BoundaryPolicy::Clamp {
                disk.pos.y = clamp_to_wall(disk.radius, side, bounds.y_limits());
            }
            disk.vel.y = reflect_axis(disk.vel.y);
            report.y_flips += 1;
        }
    }

    system.step_count += 1;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Bounds, Color, Disk};
    use glam::DVec2;

    fn single(pos: DVec2, vel: DVec2, radius: f64) -> DiskSystem {
        let disk = Disk::new(pos, vel, radius, Color::new("#708033"));
        DiskSystem::new(vec![disk], Bounds::default(), SIM_DT).unwrap()
    }

    #[test]
    fn test_resting_disk_at_center_stays_put() {
        let center = Bounds::default().center();
        let mut system = single(center, DVec2::ZERO, 10.0);
        for _ in 0..1000 {
            let report = step(&mut system);
            assert_eq!(report.total(), 0);
        }
        assert_eq!(system.disks()[0].pos, center);
        assert_eq!(system.step_count, 1000);
    }

    #[test]
    fn test_free_flight_linear_in_steps() {
        let v = 250.0;
        let mut system = single(DVec2::new(100.0, 100.0), DVec2::new(v, 0.0), 10.0);
        let k = 50;
        for _ in 0..k {
            step(&mut system);
        }
        let expected = 100.0 + k as f64 * SIM_DT * v;
        assert!((system.disks()[0].pos.x - expected).abs() < 1e-9);
        assert_eq!(system.disks()[0].pos.y, 100.0);
        assert_eq!(system.disks()[0].vel.x, v);
    }

    #[test]
    fn test_left_wall_flip_happens_once() {
        // After the move the left edge sits 1 unit past the margin
        let mut system = single(DVec2::new(15.0, 100.0), DVec2::new(-500.0, 0.0), 10.0);
        let report = step(&mut system);
        assert_eq!(report.x_flips, 1);
        assert_eq!(report.y_flips, 0);
        assert_eq!(system.disks()[0].vel.x, 500.0);
        // Overshoot is left in place under the default policy
        assert!((system.disks()[0].pos.x - 13.0).abs() < 1e-9);

        // Next step moves back inside without another flip
        let report = step(&mut system);
        assert_eq!(report.total(), 0);
        assert_eq!(system.disks()[0].vel.x, 500.0);
    }

    #[test]
    fn test_corner_flips_both_components() {
        let mut system = single(DVec2::new(585.0, 185.0), DVec2::new(1000.0, 1000.0), 10.0);
        let report = step(&mut system);
        assert_eq!(report.x_flips, 1);
        assert_eq!(report.y_flips, 1);
        assert_eq!(system.disks()[0].vel, DVec2::new(-1000.0, -1000.0));
    }

    #[test]
    fn test_clamp_policy_pulls_disk_onto_wall() {
        let mut system = single(DVec2::new(585.0, 100.0), DVec2::new(1000.0, 0.0), 10.0)
            .with_policy(BoundaryPolicy::Clamp);
        let report = step(&mut system);
        assert_eq!(report.x_flips, 1);
        assert_eq!(system.disks()[0].pos.x, 586.0);
        assert_eq!(system.disks()[0].vel.x, -1000.0);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(BoundaryPolicy::from_str("Clamp"), Some(BoundaryPolicy::Clamp));
        assert_eq!(
            BoundaryPolicy::from_str("reflect"),
            Some(BoundaryPolicy::ReflectAfterMove)
        );
        assert_eq!(BoundaryPolicy::from_str("bounce"), None);
        assert_eq!(BoundaryPolicy::default().as_str(), "reflect");
    }
}
