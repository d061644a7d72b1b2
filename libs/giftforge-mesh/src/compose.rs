//! # Scene Compositor
//!
//! Places the subject and the pedestal in one display-space frame.
//!
//! ```text
//!        subject   ← scaled by `scale`, local origin at y = height + offset
//!   ───────────── ← pedestal top, the reference plane y = height
//!   │ pedestal  │
//!   ───────────── ← y = 0
//! ```
//!
//! A [`ComposedScene`] can only be built here and only holds
//! [`ExportableSolid`]s. Decorative overlays live in a separate type and
//! never reach the serializer.

use glam::{DMat4, DVec3};
use tracing::debug;

use crate::error::MeshResult;
use crate::mesh::FlatTriangleList;
use crate::settings::PedestalSettings;
use crate::units::mm_to_display;

/// Role of a solid in the composed scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKind {
    /// The reconstructed gift model.
    Subject,
    /// The generated base.
    Pedestal,
}

/// A transform-baked display-space solid that belongs in the exported file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportableSolid {
    kind: SolidKind,
    triangles: FlatTriangleList,
}

impl ExportableSolid {
    fn new(kind: SolidKind, triangles: FlatTriangleList) -> Self {
        Self { kind, triangles }
    }

    /// Returns the solid's role.
    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    /// Returns the baked triangles.
    pub fn triangles(&self) -> &FlatTriangleList {
        &self.triangles
    }
}

/// Subject and pedestal, both in display space.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedScene {
    subject: ExportableSolid,
    pedestal: ExportableSolid,
}

impl ComposedScene {
    /// The placed subject.
    pub fn subject(&self) -> &ExportableSolid {
        &self.subject
    }

    /// The placed pedestal.
    pub fn pedestal(&self) -> &ExportableSolid {
        &self.pedestal
    }

    /// Solids in export order: subject first, then pedestal.
    pub fn solids(&self) -> [&ExportableSolid; 2] {
        [&self.subject, &self.pedestal]
    }

    /// Total triangles across both solids.
    pub fn triangle_count(&self) -> usize {
        self.subject.triangles.triangle_count() + self.pedestal.triangles.triangle_count()
    }

    /// Returns true if neither solid has triangles.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}

/// Matrix placing the subject: uniform `scale` about its local origin, then
/// a lift to `height + offset` and a depth shift of `modelZOffset`.
pub fn subject_transform(settings: &PedestalSettings) -> DMat4 {
    let lift = DVec3::new(
        0.0,
        mm_to_display(settings.height + settings.offset),
        mm_to_display(settings.model_z_offset),
    );
    DMat4::from_scale_rotation_translation(
        DVec3::splat(settings.scale),
        glam::DQuat::IDENTITY,
        lift,
    )
}

/// Matrix taking the millimetre pedestal into display units.
pub fn pedestal_transform() -> DMat4 {
    DMat4::from_scale(DVec3::splat(mm_to_display(1.0)))
}

/// Composes the scene from a normalized subject (display units) and a
/// pedestal built in its millimetre local frame.
///
/// # Errors
///
/// [`MeshError::InvalidPedestalDimensions`](crate::MeshError) if the
/// settings fail validation.
pub fn compose(
    subject: &FlatTriangleList,
    pedestal: &FlatTriangleList,
    settings: &PedestalSettings,
) -> MeshResult<ComposedScene> {
    settings.validate()?;

    let placed_subject = subject.transformed(&subject_transform(settings));
    let placed_pedestal = pedestal.transformed(&pedestal_transform());

    debug!(
        subject_triangles = placed_subject.triangle_count(),
        pedestal_triangles = placed_pedestal.triangle_count(),
        scale = settings.scale,
        "composed scene"
    );

    Ok(ComposedScene {
        subject: ExportableSolid::new(SolidKind::Subject, placed_subject),
        pedestal: ExportableSolid::new(SolidKind::Pedestal, placed_pedestal),
    })
}
