//! # Flat Triangle List
//!
//! The one geometry representation the export path works on: a contiguous
//! `[x, y, z, x, y, z, ...]` array where every nine values form one triangle
//! and no vertex is shared between triangles.

use glam::{DMat4, DVec3};

use crate::error::{MeshError, MeshResult};

/// Floats per vertex.
pub const FLOATS_PER_VERTEX: usize = 3;

/// Floats per triangle (three vertices).
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// A non-indexed triangle list.
///
/// All geometry calculations use f64 internally. Conversion to f32 only
/// happens in the STL records and the preview buffers.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::FlatTriangleList;
/// use glam::DVec3;
///
/// let mut tris = FlatTriangleList::new();
/// tris.push_triangle([DVec3::ZERO, DVec3::X, DVec3::Y]);
/// assert_eq!(tris.triangle_count(), 1);
/// assert_eq!(tris.as_slice().len(), 9);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTriangleList {
    positions: Vec<f64>,
}

impl FlatTriangleList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list with room for `triangle_count` triangles.
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangle_count * FLOATS_PER_TRIANGLE),
        }
    }

    /// Wraps an already flat buffer, checking the nine-float invariant.
    ///
    /// # Errors
    ///
    /// [`MeshError::UnsupportedGeometryFormat`] when the length is not a
    /// multiple of nine or a coordinate is not finite.
    pub fn from_flat(positions: Vec<f64>) -> MeshResult<Self> {
        if positions.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(MeshError::unsupported(format!(
                "flat triangle list length {} is not a multiple of {}",
                positions.len(),
                FLOATS_PER_TRIANGLE
            )));
        }
        if let Some(index) = positions.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::unsupported(format!(
                "non-finite coordinate at float {index}"
            )));
        }
        Ok(Self { positions })
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_TRIANGLE
    }

    /// Returns the number of vertex records (three per triangle).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_VERTEX
    }

    /// Returns true if the list holds no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the raw flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.positions
    }

    /// Appends one triangle.
    pub fn push_triangle(&mut self, corners: [DVec3; 3]) {
        for corner in corners {
            self.positions.extend_from_slice(&[corner.x, corner.y, corner.z]);
        }
    }

    /// Returns the vertex record at `index`.
    #[inline]
    pub fn vertex(&self, index: usize) -> DVec3 {
        let base = index * FLOATS_PER_VERTEX;
        DVec3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    /// Iterates triangles as corner triples.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [DVec3; 3]> + '_ {
        self.positions.chunks_exact(FLOATS_PER_TRIANGLE).map(|t| {
            [
                DVec3::new(t[0], t[1], t[2]),
                DVec3::new(t[3], t[4], t[5]),
                DVec3::new(t[6], t[7], t[8]),
            ]
        })
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `None` for an empty list.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        if self.is_empty() {
            return None;
        }
        let first = self.vertex(0);
        let bounds = (1..self.vertex_count())
            .map(|i| self.vertex(i))
            .fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
        Some(bounds)
    }

    /// Transforms every vertex by an affine matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in self.positions.chunks_exact_mut(FLOATS_PER_VERTEX) {
            let p = matrix.transform_point3(DVec3::new(v[0], v[1], v[2]));
            v.copy_from_slice(&[p.x, p.y, p.z]);
        }
    }

    /// Returns a transformed copy.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let mut copy = self.clone();
        copy.transform(matrix);
        copy
    }

    /// Translates every vertex.
    pub fn translate(&mut self, offset: DVec3) {
        for v in self.positions.chunks_exact_mut(FLOATS_PER_VERTEX) {
            v[0] += offset.x;
            v[1] += offset.y;
            v[2] += offset.z;
        }
    }

    /// Appends another list's triangles after this one's.
    pub fn append(&mut self, other: &FlatTriangleList) {
        self.positions.extend_from_slice(&other.positions);
    }

    /// Exports the positions as f32 for GPU buffers.
    pub fn to_f32(&self) -> Vec<f32> {
        self.positions.iter().map(|&v| v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> FlatTriangleList {
        let mut tris = FlatTriangleList::new();
        tris.push_triangle([DVec3::ZERO, DVec3::X, DVec3::Y]);
        tris
    }

    #[test]
    fn test_new_is_empty() {
        let tris = FlatTriangleList::new();
        assert!(tris.is_empty());
        assert_eq!(tris.triangle_count(), 0);
        assert_eq!(tris.bounding_box(), None);
    }

    #[test]
    fn test_from_flat_checks_length() {
        assert!(FlatTriangleList::from_flat(vec![0.0; 18]).is_ok());
        let err = FlatTriangleList::from_flat(vec![0.0; 10]).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedGeometryFormat { .. }));
    }

    #[test]
    fn test_from_flat_rejects_nan() {
        let mut data = vec![0.0; 9];
        data[4] = f64::NAN;
        assert!(FlatTriangleList::from_flat(data).is_err());
    }

    #[test]
    fn test_triangles_iterates_corners() {
        let tris = unit_triangle();
        let all: Vec<_> = tris.triangles().collect();
        assert_eq!(all, vec![[DVec3::ZERO, DVec3::X, DVec3::Y]]);
    }

    #[test]
    fn test_bounding_box() {
        let mut tris = FlatTriangleList::new();
        tris.push_triangle([
            DVec3::new(-1.0, -2.0, -3.0),
            DVec3::new(4.0, 5.0, 6.0),
            DVec3::ZERO,
        ]);
        let (min, max) = tris.bounding_box().unwrap();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_transform_and_translate() {
        let mut tris = unit_triangle();
        tris.transform(&DMat4::from_scale(DVec3::splat(2.0)));
        tris.translate(DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(tris.vertex(1), DVec3::new(2.0, 1.0, 0.0));
        assert_eq!(tris.vertex(2), DVec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut a = unit_triangle();
        let mut b = FlatTriangleList::new();
        b.push_triangle([DVec3::Z, DVec3::ONE, DVec3::NEG_X]);
        a.append(&b);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(a.vertex(3), DVec3::Z);
    }

    #[test]
    fn test_to_f32() {
        let tris = unit_triangle();
        assert_eq!(tris.to_f32(), vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }
}
