//! # Unit & Coordinate Conversion
//!
//! The workbench shows the scene in display space: Y is up and one unit is
//! [`MM_PER_DISPLAY_UNIT`] millimetres. Printers expect physical space:
//! millimetres with Z as height.
//!
//! ```text
//! display (x, y, z)  →  physical (10·x, 10·z, 10·y)
//!          │  └─ vertical ──────────────────┘
//!          └──── depth ──────────┘
//! ```
//!
//! The map swaps two axes, so its determinant is negative and it mirrors
//! triangle winding. [`MIRRORS_WINDING`] records that for the serializer.

use config::constants::MM_PER_DISPLAY_UNIT;
use glam::DVec3;

/// True when [`to_physical`] reverses the handedness of a triangle.
pub const MIRRORS_WINDING: bool = true;

/// Converts a display-space point to physical millimetres, Z up.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::units::to_physical;
/// use glam::DVec3;
///
/// let p = to_physical(DVec3::new(1.0, 2.0, -3.0));
/// assert_eq!(p, DVec3::new(10.0, -30.0, 20.0));
/// ```
#[inline]
pub fn to_physical(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y) * MM_PER_DISPLAY_UNIT
}

/// Converts a physical point (millimetres, Z up) back to display space.
#[inline]
pub fn to_display(p: DVec3) -> DVec3 {
    DVec3::new(p.x, p.z, p.y) / MM_PER_DISPLAY_UNIT
}

/// Converts a length in millimetres to display units.
#[inline]
pub fn mm_to_display(mm: f64) -> f64 {
    mm / MM_PER_DISPLAY_UNIT
}

/// Converts a length in display units to millimetres.
#[inline]
pub fn display_to_mm(units: f64) -> f64 {
    units * MM_PER_DISPLAY_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vertical_becomes_height_without_sign_flip() {
        let p = to_physical(DVec3::new(0.0, 1.5, 0.0));
        assert_eq!(p, DVec3::new(0.0, 0.0, 15.0));

        let below = to_physical(DVec3::new(0.0, -0.5, 0.0));
        assert_eq!(below.z, -5.0);
    }

    #[test]
    fn test_depth_passes_through_scaled() {
        assert_eq!(to_physical(DVec3::new(0.0, 0.0, 2.0)), DVec3::new(0.0, 20.0, 0.0));
        assert_eq!(to_physical(DVec3::new(0.0, 0.0, -2.0)), DVec3::new(0.0, -20.0, 0.0));
    }

    #[test]
    fn test_x_is_scaled_only() {
        assert_eq!(to_physical(DVec3::new(-3.0, 0.0, 0.0)), DVec3::new(-30.0, 0.0, 0.0));
    }

    #[test]
    fn test_round_trip_is_identity() {
        let samples = [
            DVec3::ZERO,
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-0.125, 7.75, -42.0),
            DVec3::new(1e-6, -1e6, 0.333),
        ];
        for p in samples {
            let back = to_display(to_physical(p));
            assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
            assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_map_is_a_reflection() {
        let det = glam::DMat3::from_cols(
            to_physical(DVec3::X),
            to_physical(DVec3::Y),
            to_physical(DVec3::Z),
        )
        .determinant();
        assert!(det < 0.0);
        assert!(MIRRORS_WINDING);
    }

    #[test]
    fn test_scalar_helpers() {
        assert_eq!(mm_to_display(60.0), 6.0);
        assert_eq!(display_to_mm(0.5), 5.0);
    }
}
