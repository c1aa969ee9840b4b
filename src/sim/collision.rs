//! Wall contact detection for axis-aligned boundaries
//!
//! Each axis is tested independently, so a disk in a corner can touch an
//! x-wall and a y-wall in the same step.

use glam::DVec2;

use super::state::Bounds;

/// Which wall of an axis a disk is crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left (x) or top (y) wall
    Low,
    /// Right (x) or bottom (y) wall
    High,
}

/// Result of a wall check on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    pub x: Option<Side>,
    pub y: Option<Side>,
}

/// Test one axis: extent past `hi` or before `lo` (strict)
#[inline]
pub fn axis_contact(center: f64, radius: f64, (lo, hi): (f64, f64)) -> Option<Side> {
    if center + radius > hi {
        Some(Side::High)
    } else if center - radius < lo {
        Some(Side::Low)
    } else {
        None
    }
}

/// Check a disk against all four walls
pub fn wall_contact(pos: DVec2, radius: f64, bounds: &Bounds) -> WallContact {
    WallContact {
        x: axis_contact(pos.x, radius, bounds.x_limits()),
        y: axis_contact(pos.y, radius, bounds.y_limits()),
    }
}

/// Center coordinate that puts the disk's extent exactly on the crossed wall
#[inline]
pub fn clamp_to_wall(radius: f64, side: Side, (lo, hi): (f64, f64)) -> f64 {
    match side {
        Side::High => hi - radius,
        Side::Low => lo + radius,
    }
}

/// Elastic wall reflection of one velocity component
#[inline]
pub fn reflect_axis(v: f64) -> f64 {
    -v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_no_contact() {
        let bounds = Bounds::default();
        let contact = wall_contact(DVec2::new(100.0, 100.0), 10.0, &bounds);
        assert_eq!(contact, WallContact::default());
    }

    #[test]
    fn test_touching_is_not_contact() {
        // Comparison is strict: extent exactly on the limit is inside
        assert_eq!(axis_contact(586.0, 10.0, (4.0, 596.0)), None);
        assert_eq!(axis_contact(14.0, 10.0, (4.0, 596.0)), None);
    }

    #[test]
    fn test_each_wall() {
        let bounds = Bounds::default();
        assert_eq!(wall_contact(DVec2::new(590.0, 100.0), 10.0, &bounds).x, Some(Side::High));
        assert_eq!(wall_contact(DVec2::new(10.0, 100.0), 10.0, &bounds).x, Some(Side::Low));
        assert_eq!(wall_contact(DVec2::new(100.0, 190.0), 10.0, &bounds).y, Some(Side::High));
        assert_eq!(wall_contact(DVec2::new(100.0, 10.0), 10.0, &bounds).y, Some(Side::Low));
    }

    #[test]
    fn test_corner_hits_both_axes() {
        let bounds = Bounds::default();
        let contact = wall_contact(DVec2::new(595.0, 195.0), 5.0, &bounds);
        assert_eq!(contact.x, Some(Side::High));
        assert_eq!(contact.y, Some(Side::High));
    }

    #[test]
    fn test_clamp_to_wall() {
        assert_eq!(clamp_to_wall(10.0, Side::High, (4.0, 596.0)), 586.0);
        assert_eq!(clamp_to_wall(10.0, Side::Low, (4.0, 596.0)), 14.0);
    }

    #[test]
    fn test_reflect_axis_preserves_magnitude() {
        assert_eq!(reflect_axis(250.0), -250.0);
        assert_eq!(reflect_axis(-3.5), 3.5);
    }
}
