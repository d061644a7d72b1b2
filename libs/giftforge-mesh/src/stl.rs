//! # Binary STL
//!
//! Serializes a [`ComposedScene`] into a slicer-ready binary STL and reads
//! such buffers back for verification.
//!
//! ## Layout
//!
//! ```text
//! UINT8[80]    – header, tool signature then zero padding
//! UINT32       – triangle count
//! foreach triangle
//!     REAL32[3] – unit facet normal (zeros when degenerate)
//!     REAL32[3] – vertex 1
//!     REAL32[3] – vertex 2
//!     REAL32[3] – vertex 3
//!     UINT16    – attribute byte count (always 0)
//! end
//! ```
//!
//! Little-endian throughout. Coordinates are millimetres with Z up.

use config::constants::{
    DEGENERATE_NORMAL_EPSILON, MAX_TRIANGLES, STL_COUNT_BYTES, STL_HEADER_BYTES,
    STL_HEADER_SIGNATURE, STL_TRIANGLE_BYTES,
};
use glam::{DVec3, Vec3};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::compose::ComposedScene;
use crate::error::{MeshError, MeshResult};
use crate::units::{to_physical, MIRRORS_WINDING};

const PREAMBLE_BYTES: usize = STL_HEADER_BYTES + STL_COUNT_BYTES;

// =============================================================================
// WRITING
// =============================================================================

/// Options for [`write_binary_stl`].
#[derive(Debug, Clone, PartialEq)]
pub struct StlOptions {
    /// Header text; truncated to 80 bytes, zero padded.
    pub header: String,
    /// Shift the model so its lowest point sits at Z = 0.
    ///
    /// Exports must keep this on. Turning it off leaves the subject at its
    /// scene height and is only for checking raw vertex placement.
    pub drop_to_bed: bool,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            header: STL_HEADER_SIGNATURE.to_string(),
            drop_to_bed: true,
        }
    }
}

/// Serializes `scene` with the default options.
pub fn serialize(scene: &ComposedScene) -> MeshResult<Vec<u8>> {
    write_binary_stl(scene, &StlOptions::default())
}

/// Serializes `scene` into one binary STL buffer.
///
/// Subject triangles come first, then the pedestal. Every vertex goes
/// through [`to_physical`]; because that map mirrors, each triangle is
/// written as `(v0, v2, v1)` to keep its outward orientation.
///
/// # Errors
///
/// - [`MeshError::EmptyScene`] if neither solid has triangles
/// - [`MeshError::TooManyTriangles`] above the export limit
/// - [`MeshError::CoordinateOutOfRange`] if a placed vertex is not finite
///   or exceeds the `f32` range
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::compose::compose;
/// use giftforge_mesh::stl::{parse_binary_stl, serialize};
/// use giftforge_mesh::{build_pedestal, FlatTriangleList, PedestalSettings};
///
/// let settings = PedestalSettings::default();
/// let pedestal = build_pedestal(&settings).unwrap();
/// let scene = compose(&FlatTriangleList::new(), &pedestal, &settings).unwrap();
///
/// let bytes = serialize(&scene).unwrap();
/// assert_eq!(bytes.len(), 84 + 50 * 144);
/// assert_eq!(parse_binary_stl(&bytes).unwrap().triangles.len(), 144);
/// ```
pub fn write_binary_stl(scene: &ComposedScene, options: &StlOptions) -> MeshResult<Vec<u8>> {
    let count = scene.triangle_count();
    if count == 0 {
        return Err(MeshError::EmptyScene);
    }
    if count > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count,
            max: MAX_TRIANGLES,
        });
    }
    let header_count = u32::try_from(count).map_err(|_| MeshError::TooManyTriangles {
        count,
        max: MAX_TRIANGLES,
    })?;

    let mut triangles: Vec<[DVec3; 3]> = Vec::with_capacity(count);
    for solid in scene.solids() {
        triangles.extend(solid.triangles().triangles().map(|[a, b, c]| {
            let (a, b, c) = (to_physical(a), to_physical(b), to_physical(c));
            if MIRRORS_WINDING {
                [a, c, b]
            } else {
                [a, b, c]
            }
        }));
    }

    let lift = if options.drop_to_bed {
        let floor = triangles
            .iter()
            .flatten()
            .map(|v| v.z)
            .fold(f64::INFINITY, f64::min);
        DVec3::new(0.0, 0.0, -floor)
    } else {
        DVec3::ZERO
    };

    for triangle in &mut triangles {
        for corner in triangle.iter_mut() {
            *corner += lift;
            check_representable(*corner)?;
        }
    }

    let mut bytes = vec![0u8; PREAMBLE_BYTES + count * STL_TRIANGLE_BYTES];
    let header = options.header.as_bytes();
    let header_len = header.len().min(STL_HEADER_BYTES);
    bytes[..header_len].copy_from_slice(&header[..header_len]);
    bytes[STL_HEADER_BYTES..PREAMBLE_BYTES].copy_from_slice(&header_count.to_le_bytes());

    let degenerate: usize = bytes[PREAMBLE_BYTES..]
        .par_chunks_mut(STL_TRIANGLE_BYTES)
        .zip(triangles.par_iter())
        .map(|(record, triangle)| usize::from(!encode_record(record, *triangle)))
        .sum();

    if degenerate > 0 {
        warn!(degenerate, "zero-filled normals of degenerate triangles");
    }
    info!(
        triangles = count,
        bytes = bytes.len(),
        subject = scene.subject().triangles().triangle_count(),
        pedestal = scene.pedestal().triangles().triangle_count(),
        "exported binary STL"
    );
    Ok(bytes)
}

fn check_representable(v: DVec3) -> MeshResult<()> {
    let limit = f64::from(f32::MAX);
    if v.is_finite() && v.abs().max_element() <= limit {
        Ok(())
    } else {
        Err(MeshError::out_of_range(format!(
            "vertex {v} does not fit in a 32-bit float"
        )))
    }
}

/// Computes the unit facet normal, or `None` for a degenerate triangle.
pub fn facet_normal(corners: &[DVec3; 3]) -> Option<DVec3> {
    let cross = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
    let length_squared = cross.length_squared();
    (length_squared.is_finite() && length_squared > DEGENERATE_NORMAL_EPSILON)
        .then(|| cross / length_squared.sqrt())
}

/// Fills one 50-byte record. Returns false if the normal was zero-filled.
fn encode_record(record: &mut [u8], corners: [DVec3; 3]) -> bool {
    let normal = facet_normal(&corners);
    put_vec3(&mut record[0..12], normal.unwrap_or(DVec3::ZERO));
    for (slot, corner) in corners.iter().enumerate() {
        let at = 12 + slot * 12;
        put_vec3(&mut record[at..at + 12], *corner);
    }
    record[48..50].copy_from_slice(&0u16.to_le_bytes());
    normal.is_some()
}

fn put_vec3(out: &mut [u8], v: DVec3) {
    out[0..4].copy_from_slice(&(v.x as f32).to_le_bytes());
    out[4..8].copy_from_slice(&(v.y as f32).to_le_bytes());
    out[8..12].copy_from_slice(&(v.z as f32).to_le_bytes());
}

// =============================================================================
// READING
// =============================================================================

/// One decoded triangle record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlTriangle {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
    pub attribute: u16,
}

/// A decoded binary STL buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct StlDocument {
    pub header: [u8; STL_HEADER_BYTES],
    pub triangles: Vec<StlTriangle>,
}

impl StlDocument {
    /// Header text up to the first zero byte.
    pub fn header_text(&self) -> String {
        let end = self.header.iter().position(|&b| b == 0).unwrap_or(STL_HEADER_BYTES);
        String::from_utf8_lossy(&self.header[..end]).into_owned()
    }

    /// Lowest Z over all vertices, `None` without triangles.
    pub fn min_z(&self) -> Option<f32> {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices)
            .map(|v| v.z)
            .reduce(f32::min)
    }
}

/// Decodes a binary STL buffer.
///
/// # Errors
///
/// [`MeshError::MalformedStl`] if the buffer is shorter than the preamble
/// or its length disagrees with the triangle count.
pub fn parse_binary_stl(bytes: &[u8]) -> MeshResult<StlDocument> {
    if bytes.len() < PREAMBLE_BYTES {
        return Err(MeshError::malformed_stl(format!(
            "buffer of {} bytes is shorter than the {PREAMBLE_BYTES}-byte preamble",
            bytes.len()
        )));
    }

    let mut header = [0u8; STL_HEADER_BYTES];
    header.copy_from_slice(&bytes[..STL_HEADER_BYTES]);
    let count = u32::from_le_bytes([
        bytes[STL_HEADER_BYTES],
        bytes[STL_HEADER_BYTES + 1],
        bytes[STL_HEADER_BYTES + 2],
        bytes[STL_HEADER_BYTES + 3],
    ]) as usize;

    let body = &bytes[PREAMBLE_BYTES..];
    let expected = count.checked_mul(STL_TRIANGLE_BYTES);
    if expected != Some(body.len()) {
        return Err(MeshError::malformed_stl(format!(
            "header declares {count} triangles but {} bytes of records follow",
            body.len()
        )));
    }

    let triangles = body
        .chunks_exact(STL_TRIANGLE_BYTES)
        .map(|record| StlTriangle {
            normal: read_vec3(&record[0..12]),
            vertices: [
                read_vec3(&record[12..24]),
                read_vec3(&record[24..36]),
                read_vec3(&record[36..48]),
            ],
            attribute: u16::from_le_bytes([record[48], record[49]]),
        })
        .collect();

    Ok(StlDocument { header, triangles })
}

fn read_vec3(buf: &[u8]) -> Vec3 {
    let read = |at: usize| f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
    Vec3::new(read(0), read(4), read(8))
}
