//! # Pedestal Solid Generator
//!
//! Builds the printable base the subject stands on.
//!
//! ## Local Frame
//!
//! Millimetres, Y up. The footprint is centred on the origin and the solid
//! spans `y ∈ [0, height]`, so the top face is the plane `y = height`.
//!
//! ## Shapes
//!
//! | Shape    | Outline                                  | Triangles          |
//! |----------|------------------------------------------|--------------------|
//! | Cylinder | regular polygon, `segments` points       | `4 × segments`     |
//! | Box      | rounded rectangle, `4 × (corner + 1)`    | `4 × outline`      |

pub mod outline;
mod prism;

use config::constants::PedestalConfig;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::FlatTriangleList;
use crate::settings::{PedestalSettings, PedestalShape};

pub use prism::triangle_count;

/// Builds the pedestal with the default tessellation.
///
/// # Errors
///
/// [`MeshError::InvalidPedestalDimensions`] when a
/// dimension is non-positive or not finite.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::{build_pedestal, PedestalSettings, PedestalShape};
///
/// let box_pedestal = build_pedestal(&PedestalSettings::default()).unwrap();
/// assert_eq!(box_pedestal.triangle_count(), 144);
///
/// let round = PedestalSettings::default().with_shape(PedestalShape::Cylinder).with_width(40.0);
/// assert_eq!(build_pedestal(&round).unwrap().triangle_count(), 256);
/// ```
pub fn build_pedestal(settings: &PedestalSettings) -> MeshResult<FlatTriangleList> {
    build_pedestal_with(settings, &PedestalConfig::default())
}

/// Builds the pedestal with explicit tessellation parameters.
///
/// # Errors
///
/// [`MeshError::InvalidPedestalDimensions`] for bad settings or a
/// tessellation outside the accepted ranges.
pub fn build_pedestal_with(
    settings: &PedestalSettings,
    config: &PedestalConfig,
) -> MeshResult<FlatTriangleList> {
    settings.validate()?;
    // Fields are public, so re-check a hand-built config.
    PedestalConfig::new(config.cylinder_segments, config.corner_segments, config.fillet_ratio)
        .map_err(|err| MeshError::invalid_dimensions(err.to_string()))?;
    let (width, depth) = settings.footprint();

    let ring = match settings.shape {
        PedestalShape::Cylinder => outline::circle(width / 2.0, config.cylinder_segments),
        PedestalShape::Box => {
            let radius = width.min(depth) * config.fillet_ratio;
            outline::rounded_rect(width, depth, radius, config.corner_segments)
        }
    };
    let solid = prism::extrude(&ring, settings.height);

    debug!(
        shape = ?settings.shape,
        width,
        depth,
        height = settings.height,
        triangles = solid.triangle_count(),
        "built pedestal"
    );
    Ok(solid)
}
