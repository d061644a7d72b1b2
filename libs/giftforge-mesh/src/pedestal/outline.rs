//! # Footprint Outlines
//!
//! Convex footprint polygons in the pedestal's ground plane.
//!
//! Outline points are `DVec2(x, y)` with X to the right and Y pointing to the
//! back of the scene (display −Z). Points wind counter-clockwise, which is
//! counter-clockwise seen from above once lifted into Y-up display space.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;

/// Regular polygon approximating a circle of `radius`, starting on +X.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::pedestal::outline::circle;
///
/// let ring = circle(20.0, 64);
/// assert_eq!(ring.len(), 64);
/// assert!((ring[16].y - 20.0).abs() < 1e-9);
/// ```
pub fn circle(radius: f64, segments: u32) -> Vec<DVec2> {
    let step = TAU / segments as f64;
    (0..segments)
        .map(|i| {
            let (sin, cos) = (i as f64 * step).sin_cos();
            DVec2::new(radius * cos, radius * sin)
        })
        .collect()
}

/// Rectangle of `width × depth` centred on the origin with its corners
/// replaced by quarter arcs of `radius`, each split into `corner_segments`.
///
/// Produces `4 × (corner_segments + 1)` points. `radius` must be smaller than
/// half of both dimensions so the straight edges keep a positive length.
pub fn rounded_rect(width: f64, depth: f64, radius: f64, corner_segments: u32) -> Vec<DVec2> {
    let half = DVec2::new(width / 2.0, depth / 2.0);
    let inner = half - DVec2::splat(radius);
    // Arc centres and start angles, counter-clockwise from the front-right corner.
    let corners = [
        (DVec2::new(inner.x, -inner.y), -FRAC_PI_2),
        (DVec2::new(inner.x, inner.y), 0.0),
        (DVec2::new(-inner.x, inner.y), FRAC_PI_2),
        (DVec2::new(-inner.x, -inner.y), 2.0 * FRAC_PI_2),
    ];

    let step = FRAC_PI_2 / corner_segments as f64;
    let mut points = Vec::with_capacity(4 * (corner_segments as usize + 1));
    for (centre, start) in corners {
        for i in 0..=corner_segments {
            let (sin, cos) = (start + i as f64 * step).sin_cos();
            points.push(centre + DVec2::new(cos, sin) * radius);
        }
    }
    points
}

/// Twice the signed area of an outline; positive when counter-clockwise.
pub fn signed_area2(points: &[DVec2]) -> f64 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circle_points_lie_on_radius() {
        for p in circle(12.5, 48) {
            assert_abs_diff_eq!(p.length(), 12.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_circle_is_counter_clockwise() {
        assert!(signed_area2(&circle(1.0, 32)) > 0.0);
    }

    #[test]
    fn test_rounded_rect_point_count() {
        assert_eq!(rounded_rect(60.0, 40.0, 4.0, 8).len(), 36);
        assert_eq!(rounded_rect(60.0, 40.0, 4.0, 1).len(), 8);
    }

    #[test]
    fn test_rounded_rect_stays_inside_footprint() {
        let points = rounded_rect(60.0, 40.0, 4.0, 8);
        for p in &points {
            assert!(p.x.abs() <= 30.0 + 1e-9);
            assert!(p.y.abs() <= 20.0 + 1e-9);
        }
        // Straight edges touch the footprint boundary.
        assert!(points.iter().any(|p| (p.x - 30.0).abs() < 1e-9));
        assert!(points.iter().any(|p| (p.y + 20.0).abs() < 1e-9));
    }

    #[test]
    fn test_rounded_rect_is_counter_clockwise() {
        assert!(signed_area2(&rounded_rect(60.0, 40.0, 4.0, 8)) > 0.0);
    }

    #[test]
    fn test_rounded_rect_area_matches_fillet_formula() {
        let (w, d, r) = (60.0, 40.0, 4.0);
        // Fine tessellation approaches w·d − (4 − π)·r².
        let area = signed_area2(&rounded_rect(w, d, r, 256)) / 2.0;
        let exact = w * d - (4.0 - std::f64::consts::PI) * r * r;
        assert_abs_diff_eq!(area, exact, epsilon = 1e-3);
    }
}
