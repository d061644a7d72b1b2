//! # Prism Extrusion
//!
//! Extrudes a convex footprint outline straight up into a closed solid.

use glam::{DVec2, DVec3};

use crate::mesh::FlatTriangleList;

/// Triangles produced for an outline of `points` vertices: two per wall quad
/// plus one fan triangle per edge on each cap.
#[inline]
pub fn triangle_count(points: usize) -> usize {
    4 * points
}

/// Extrudes `outline` from `y = 0` to `y = height` in a Y-up frame.
///
/// Outline `(x, y)` maps to `(x, ·, -y)`, so a counter-clockwise outline
/// yields outward-facing triangles. Caps are fans around the outline's
/// centroid, which keeps fan triangles away from slivers on rounded corners.
pub fn extrude(outline: &[DVec2], height: f64) -> FlatTriangleList {
    let n = outline.len();
    let mut tris = FlatTriangleList::with_capacity(triangle_count(n));
    if n < 3 {
        return tris;
    }

    let lift = |p: DVec2, y: f64| DVec3::new(p.x, y, -p.y);
    let centroid = outline.iter().copied().sum::<DVec2>() / n as f64;
    let bottom_centre = lift(centroid, 0.0);
    let top_centre = lift(centroid, height);

    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1) = (lift(outline[i], 0.0), lift(outline[j], 0.0));
        let (t0, t1) = (lift(outline[i], height), lift(outline[j], height));

        // Wall
        tris.push_triangle([b0, b1, t1]);
        tris.push_triangle([b0, t1, t0]);

        // Caps
        tris.push_triangle([top_centre, t0, t1]);
        tris.push_triangle([bottom_centre, b1, b0]);
    }
    tris
}
