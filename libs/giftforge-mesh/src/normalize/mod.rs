//! # Geometry Normalizer
//!
//! Turns the loader's typed [`RawMesh`] into a [`FlatTriangleList`].
//!
//! ## Pipeline
//!
//! ```text
//! RawPrimitive ─┬─ unpack positions (packed or interleaved → packed f64)
//!               ├─ bake world transform
//!               └─ de-index (or take triangles as they come)
//!                        ↓
//!               FlatTriangleList (primitives concatenated in order)
//! ```
//!
//! Anything that cannot be read unambiguously is rejected with
//! [`MeshError::UnsupportedGeometryFormat`]. Nothing is written to the output
//! until every primitive has been validated.

use std::fmt;

use config::constants::MAX_TRIANGLES;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::FlatTriangleList;

// =============================================================================
// MESH IDENTITY
// =============================================================================

/// Identity of a loaded subject mesh, usually the asset URL.
///
/// The auto-fit latch keys on this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(String);

impl MeshId {
    /// Creates an identity from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MeshId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// RAW INPUT TYPES
// =============================================================================

/// Description of a vertex position attribute as the loader found it.
///
/// Mirrors a GPU buffer attribute: `item_size` components per vertex, read
/// from `data` starting at `offset` and advancing `stride` floats per vertex.
/// A tightly packed buffer has `stride == item_size == 3` and `offset == 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionBuffer {
    /// Backing float storage, possibly shared with other attributes.
    pub data: Vec<f32>,
    /// Components per vertex.
    pub item_size: usize,
    /// Floats between the starts of consecutive vertices.
    pub stride: usize,
    /// Float offset of the first component inside each record.
    pub offset: usize,
    /// True when components are quantized integers mapped to [-1, 1].
    pub normalized: bool,
}

impl PositionBuffer {
    /// A tightly packed `[x, y, z, ...]` buffer.
    pub fn packed(data: Vec<f32>) -> Self {
        Self {
            data,
            item_size: 3,
            stride: 3,
            offset: 0,
            normalized: false,
        }
    }

    /// Three position components interleaved with other attributes.
    pub fn interleaved(data: Vec<f32>, stride: usize, offset: usize) -> Self {
        Self {
            data,
            item_size: 3,
            stride,
            offset,
            normalized: false,
        }
    }

    /// Returns true if the buffer is already tightly packed.
    pub fn is_packed(&self) -> bool {
        self.item_size == 3 && self.stride == 3 && self.offset == 0
    }

    /// Rebuilds the positions into packed f64 vertices.
    fn unpack(&self) -> MeshResult<Vec<DVec3>> {
        if self.item_size != 3 {
            return Err(MeshError::unsupported(format!(
                "position item size is {}, expected 3",
                self.item_size
            )));
        }
        if self.normalized {
            return Err(MeshError::unsupported(
                "quantized (normalized) positions must be dequantized by the loader",
            ));
        }
        if self.stride < self.offset + self.item_size {
            return Err(MeshError::unsupported(format!(
                "stride {} cannot hold 3 components at offset {}",
                self.stride, self.offset
            )));
        }
        if self.data.len() % self.stride != 0 {
            return Err(MeshError::unsupported(format!(
                "buffer length {} is not a whole number of {}-float records",
                self.data.len(),
                self.stride
            )));
        }

        let vertices: Vec<DVec3> = self
            .data
            .chunks_exact(self.stride)
            .map(|record| {
                let c = &record[self.offset..self.offset + 3];
                DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64)
            })
            .collect();

        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::unsupported(format!(
                "vertex {index} has a non-finite coordinate"
            )));
        }
        Ok(vertices)
    }
}

/// One drawable piece of the loaded asset.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrimitive {
    /// Vertex positions.
    pub positions: PositionBuffer,
    /// Triangle indices, three per triangle, if the geometry is indexed.
    pub indices: Option<Vec<u32>>,
    /// World transform resolved from the asset's node hierarchy.
    pub world: Option<DMat4>,
}

impl RawPrimitive {
    /// Creates a non-indexed primitive without a transform.
    pub fn new(positions: PositionBuffer) -> Self {
        Self {
            positions,
            indices: None,
            world: None,
        }
    }

    /// Attaches triangle indices.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Attaches a world transform.
    pub fn with_world(mut self, world: DMat4) -> Self {
        self.world = Some(world);
        self
    }

    fn triangle_count_hint(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.data.len() / self.positions.stride.max(1) / 3,
        }
    }
}

/// The typed mesh value the loader hands to the core.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    /// Identity used by the auto-fit latch.
    pub id: MeshId,
    /// Primitives in asset order.
    pub primitives: Vec<RawPrimitive>,
}

impl RawMesh {
    /// Creates a mesh without primitives.
    pub fn new(id: impl Into<MeshId>) -> Self {
        Self {
            id: id.into(),
            primitives: Vec::new(),
        }
    }

    /// Creates a single-primitive mesh.
    pub fn single(id: impl Into<MeshId>, primitive: RawPrimitive) -> Self {
        Self {
            id: id.into(),
            primitives: vec![primitive],
        }
    }

    /// Appends a primitive.
    pub fn push(&mut self, primitive: RawPrimitive) {
        self.primitives.push(primitive);
    }
}

impl From<String> for MeshId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Flattens every primitive of `mesh` into one non-indexed triangle list.
///
/// # Errors
///
/// - [`MeshError::UnsupportedGeometryFormat`] for buffers that cannot be
///   rebuilt into packed positions, bad index data or a non-finite transform
/// - [`MeshError::TooManyTriangles`] above the configured limit
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::normalize::{normalize, PositionBuffer, RawMesh, RawPrimitive};
///
/// let positions = PositionBuffer::packed(vec![
///     0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 1.0, 0.0,  0.0, 1.0, 0.0,
/// ]);
/// let quad = RawPrimitive::new(positions).with_indices(vec![0, 1, 2, 0, 2, 3]);
/// let flat = normalize(&RawMesh::single("quad.glb", quad)).unwrap();
/// assert_eq!(flat.triangle_count(), 2);
/// assert_eq!(flat.vertex_count(), 6);
/// ```
pub fn normalize(mesh: &RawMesh) -> MeshResult<FlatTriangleList> {
    let hinted: usize = mesh.primitives.iter().map(RawPrimitive::triangle_count_hint).sum();
    if hinted > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count: hinted,
            max: MAX_TRIANGLES,
        });
    }

    // Validate everything before producing output.
    let mut prepared = Vec::with_capacity(mesh.primitives.len());
    for (index, primitive) in mesh.primitives.iter().enumerate() {
        let part = prepare_primitive(primitive).map_err(|err| match err {
            MeshError::UnsupportedGeometryFormat { message } => {
                MeshError::unsupported(format!("primitive {index}: {message}"))
            }
            other => other,
        })?;
        prepared.push(part);
    }

    let total: usize = prepared.iter().map(|p| p.triangle_count()).sum();
    let mut flat = FlatTriangleList::with_capacity(total);
    for part in &prepared {
        flat.append(part);
    }

    debug!(
        mesh = %mesh.id,
        primitives = mesh.primitives.len(),
        triangles = flat.triangle_count(),
        "normalized subject mesh"
    );
    Ok(flat)
}

fn prepare_primitive(primitive: &RawPrimitive) -> MeshResult<FlatTriangleList> {
    let mut vertices = primitive.positions.unpack()?;
    if !primitive.positions.is_packed() {
        debug!(
            stride = primitive.positions.stride,
            offset = primitive.positions.offset,
            "rebuilt interleaved position buffer"
        );
    }

    let mut mirrored = false;
    if let Some(world) = primitive.world {
        if !world.is_finite() {
            return Err(MeshError::unsupported("world transform is not finite"));
        }
        for v in &mut vertices {
            *v = world.transform_point3(*v);
        }
        mirrored = world.determinant() < 0.0;
    }

    let corners = |a: usize, b: usize, c: usize| {
        if mirrored {
            [vertices[a], vertices[c], vertices[b]]
        } else {
            [vertices[a], vertices[b], vertices[c]]
        }
    };

    match &primitive.indices {
        Some(indices) => {
            if indices.len() % 3 != 0 {
                return Err(MeshError::unsupported(format!(
                    "index count {} is not a multiple of 3",
                    indices.len()
                )));
            }
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(MeshError::unsupported(format!(
                    "index {bad} out of range (vertex count = {})",
                    vertices.len()
                )));
            }
            let mut flat = FlatTriangleList::with_capacity(indices.len() / 3);
            for tri in indices.chunks_exact(3) {
                flat.push_triangle(corners(tri[0] as usize, tri[1] as usize, tri[2] as usize));
            }
            Ok(flat)
        }
        None => {
            if vertices.len() % 3 != 0 {
                return Err(MeshError::unsupported(format!(
                    "non-indexed vertex count {} is not a multiple of 3",
                    vertices.len()
                )));
            }
            let mut flat = FlatTriangleList::with_capacity(vertices.len() / 3);
            for base in (0..vertices.len()).step_by(3) {
                flat.push_triangle(corners(base, base + 1, base + 2));
            }
            Ok(flat)
        }
    }
}

#[cfg(test)]
mod tests;
