//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by disk index)
//! - No rendering or file system dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;
pub mod velocity;

pub use collision::{Side, WallContact, axis_contact, reflect_axis, wall_contact};
pub use layout::{CoreDisk, LayoutConfig, RingSpec, build_layout};
pub use state::{Bounds, Color, Disk, DiskRecord, DiskSystem};
pub use tick::{BoundaryPolicy, StepReport, step};
pub use velocity::{VelocityConfig, assign_velocities, halve_radii, max_radius};
