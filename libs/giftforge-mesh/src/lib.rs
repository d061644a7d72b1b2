//! # Giftforge Mesh
//!
//! Browser-safe scene composition and binary STL export for printable gifts.
//! Takes an untrusted reconstructed mesh, stands it on a parametric
//! pedestal and writes the pair as one slicer-ready solid.
//!
//! ## Architecture
//!
//! ```text
//! RawMesh ─→ normalize ─┐
//!                       ├─→ compose ─→ stl::serialize ─→ bytes (mm, Z up)
//! settings ─→ pedestal ─┘       └─→ engraving (preview only)
//! ```
//!
//! ## Frames
//!
//! - **Display**: Y up, one unit = 10 mm. Subject meshes and composed scenes.
//! - **Pedestal local**: Y up, millimetres, `y ∈ [0, height]`.
//! - **Physical**: millimetres, Z up. Only inside the STL writer.
//!
//! ## Usage
//!
//! ```rust
//! use giftforge_mesh::normalize::{PositionBuffer, RawMesh, RawPrimitive};
//! use giftforge_mesh::{export_scene_to_stl, normalize, PedestalSettings};
//!
//! let triangle = PositionBuffer::packed(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
//! let subject = normalize(&RawMesh::single("gift.glb", RawPrimitive::new(triangle))).unwrap();
//!
//! let bytes = export_scene_to_stl(&subject, &PedestalSettings::default()).unwrap();
//! assert_eq!(bytes.len(), 84 + 50 * (1 + 144));
//! ```

pub mod autofit;
pub mod compose;
pub mod engraving;
pub mod error;
pub mod mesh;
pub mod normalize;
pub mod pedestal;
pub mod settings;
pub mod stl;
pub mod units;
pub mod workbench;

pub use autofit::{ChangeOrigin, FitLatch, FitPlan, FitState};
pub use compose::{ComposedScene, ExportableSolid, SolidKind};
pub use engraving::{DecorativeOverlay, TextLabel};
pub use error::{MeshError, MeshResult};
pub use mesh::FlatTriangleList;
pub use normalize::{normalize, MeshId, RawMesh};
pub use pedestal::{build_pedestal, build_pedestal_with};
pub use settings::{PedestalSettings, PedestalShape};
pub use stl::{parse_binary_stl, serialize, StlOptions};
pub use units::{to_display, to_physical};
pub use workbench::{LoadOutcome, Preview, Workbench};

/// Builds the pedestal, composes it with `subject` and returns the binary
/// STL bytes.
///
/// `subject` is a normalized mesh in display units, resting at its own
/// local origin.
///
/// # Errors
///
/// - [`MeshError::InvalidPedestalDimensions`] for bad settings
/// - [`MeshError::TooManyTriangles`] above the export limit
pub fn export_scene_to_stl(
    subject: &FlatTriangleList,
    settings: &PedestalSettings,
) -> MeshResult<Vec<u8>> {
    let pedestal = build_pedestal(settings)?;
    let scene = compose::compose(subject, &pedestal, settings)?;
    serialize(&scene)
}
