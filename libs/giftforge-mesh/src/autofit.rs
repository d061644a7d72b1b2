//! # Auto-Fit
//!
//! One-shot sizing of a freshly loaded subject to its pedestal.
//!
//! The heuristic is pure ([`plan_auto_fit`]); the "once per mesh" rule is a
//! separate two-state latch ([`FitLatch`]) so a settings write caused by
//! fitting can never trigger another fit.

use config::constants::{approx_zero, AUTO_FIT_WIDTH_RATIO};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::mesh::FlatTriangleList;
use crate::normalize::MeshId;
use crate::settings::PedestalSettings;
use crate::units::mm_to_display;

/// Who caused a settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeOrigin {
    /// An edit made through the controls.
    User,
    /// The one-shot fit of a newly loaded mesh.
    AutoFit,
}

/// Result of the auto-fit heuristic for one mesh and pedestal width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPlan {
    /// Uniform scale taking the largest dimension to 70 % of the width.
    pub scale: f64,
    /// Lift of the local origin above the pedestal top, mm.
    pub offset: f64,
    /// Translation (display units) moving the horizontal centre to the
    /// origin and the lowest point to `y = 0` in the mesh's own frame.
    pub recenter: DVec3,
}

impl FitPlan {
    /// Writes the fitted `scale` and `offset` into `settings`.
    pub fn apply_to(&self, settings: &mut PedestalSettings) {
        settings.scale = self.scale;
        settings.offset = self.offset;
    }
}

/// Computes the fit for `subject` (display units) on a pedestal `width_mm`
/// wide. Returns `None` for an empty mesh.
///
/// A mesh with no extent keeps scale 1 so it is never blown up to infinity.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::autofit::plan_auto_fit;
/// use giftforge_mesh::FlatTriangleList;
/// use glam::DVec3;
///
/// let mut tris = FlatTriangleList::new();
/// tris.push_triangle([DVec3::new(0.0, 2.0, 0.0), DVec3::new(2.0, 2.0, 0.0), DVec3::new(0.0, 3.0, 1.0)]);
/// let plan = plan_auto_fit(&tris, 60.0).unwrap();
/// // 70 % of 6 display units over a largest dimension of 2.
/// assert!((plan.scale - 2.1).abs() < 1e-12);
/// assert_eq!(plan.recenter, DVec3::new(-1.0, -2.0, -0.5));
/// ```
pub fn plan_auto_fit(subject: &FlatTriangleList, width_mm: f64) -> Option<FitPlan> {
    let (min, max) = subject.bounding_box()?;
    let size = max - min;
    let largest = size.max_element();
    let centre = (min + max) / 2.0;

    let scale = if approx_zero(largest) {
        warn!(largest, "subject has no extent, keeping scale 1");
        1.0
    } else {
        AUTO_FIT_WIDTH_RATIO * mm_to_display(width_mm) / largest
    };

    Some(FitPlan {
        scale,
        offset: 0.0,
        recenter: DVec3::new(-centre.x, -min.y, -centre.z),
    })
}

/// Fit state for the current subject.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FitState {
    /// No mesh has been fitted since the last reset.
    #[default]
    Unfitted,
    /// The mesh with this identity has been fitted.
    Fitted(MeshId),
}

/// Guard that lets auto-fit run exactly once per mesh identity.
#[derive(Debug, Clone, Default)]
pub struct FitLatch {
    state: FitState,
}

impl FitLatch {
    /// Creates an unfitted latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &FitState {
        &self.state
    }

    /// Returns true if `id` is the mesh already fitted.
    pub fn is_fitted(&self, id: &MeshId) -> bool {
        matches!(&self.state, FitState::Fitted(current) if current == id)
    }

    /// Moves to `Fitted(id)` and returns true, unless `id` is already fitted.
    ///
    /// Checking and setting happen in one call so no settings edit can land
    /// in between.
    pub fn try_claim(&mut self, id: &MeshId) -> bool {
        if self.is_fitted(id) {
            return false;
        }
        info!(mesh = %id, "auto-fit latched");
        self.state = FitState::Fitted(id.clone());
        true
    }

    /// Returns to `Unfitted` so the next claim fits again.
    pub fn reset(&mut self) {
        self.state = FitState::Unfitted;
    }
}
