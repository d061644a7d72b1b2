//! # Workbench Session
//!
//! Owns the live [`PedestalSettings`], the loaded subject and the auto-fit
//! latch. Preview and export both read the settings; only user edits and
//! the one-shot fit write them.

use config::constants::PedestalConfig;
use serde::Serialize;
use tracing::{debug, info};

use crate::autofit::{plan_auto_fit, ChangeOrigin, FitLatch, FitState};
use crate::compose::{compose, ComposedScene};
use crate::engraving::{layout_engraving, DecorativeOverlay};
use crate::error::MeshResult;
use crate::mesh::FlatTriangleList;
use crate::normalize::{normalize, MeshId, RawMesh};
use crate::pedestal::build_pedestal_with;
use crate::settings::PedestalSettings;
use crate::stl::{write_binary_stl, StlOptions};

/// Summary of a subject load, handed back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOutcome {
    pub mesh: MeshId,
    pub triangles: usize,
    /// True if this load wrote fitted `scale`/`offset` into the settings.
    pub fitted: bool,
    pub settings: PedestalSettings,
}

/// What the viewport draws: the exportable scene plus decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub scene: ComposedScene,
    pub overlay: DecorativeOverlay,
}

#[derive(Debug, Clone)]
struct Subject {
    id: MeshId,
    /// Normalized and recentred: horizontal centre on the origin, lowest
    /// point at `y = 0`.
    triangles: FlatTriangleList,
}

/// A single user's editing session.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    settings: PedestalSettings,
    pedestal_config: PedestalConfig,
    subject: Option<Subject>,
    latch: FitLatch,
    last_change: Option<ChangeOrigin>,
    revision: u64,
}

impl Workbench {
    /// Creates a session with default settings and tessellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with explicit pedestal tessellation.
    pub fn with_config(pedestal_config: PedestalConfig) -> Self {
        Self {
            pedestal_config,
            ..Self::default()
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &PedestalSettings {
        &self.settings
    }

    /// Origin of the most recent settings write, if any.
    pub fn last_change(&self) -> Option<ChangeOrigin> {
        self.last_change
    }

    /// Increments on every settings write.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Auto-fit latch state.
    pub fn fit_state(&self) -> &FitState {
        self.latch.state()
    }

    /// Identity of the loaded subject.
    pub fn subject_id(&self) -> Option<&MeshId> {
        self.subject.as_ref().map(|s| &s.id)
    }

    /// The loaded subject in its recentred local frame (display units).
    pub fn subject(&self) -> Option<&FlatTriangleList> {
        self.subject.as_ref().map(|s| &s.triangles)
    }

    /// Normalizes and stores a new subject, fitting it once per identity.
    ///
    /// Reloading a mesh that is already fitted keeps the user's settings.
    ///
    /// # Errors
    ///
    /// Any normalization error. The previous subject stays loaded.
    pub fn load_subject(&mut self, raw: &RawMesh) -> MeshResult<LoadOutcome> {
        let mut triangles = normalize(raw)?;
        let plan = plan_auto_fit(&triangles, self.settings.width);

        let mut fitted = false;
        if let Some(plan) = plan {
            triangles.translate(plan.recenter);
            if self.latch.try_claim(&raw.id) {
                plan.apply_to(&mut self.settings);
                self.record(ChangeOrigin::AutoFit);
                fitted = true;
                info!(mesh = %raw.id, scale = plan.scale, "auto-fitted subject");
            }
        }

        let outcome = LoadOutcome {
            mesh: raw.id.clone(),
            triangles: triangles.triangle_count(),
            fitted,
            settings: self.settings.clone(),
        };
        self.subject = Some(Subject {
            id: raw.id.clone(),
            triangles,
        });
        Ok(outcome)
    }

    /// Replaces the settings on behalf of the user.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidPedestalDimensions`](crate::MeshError); the old
    /// settings are kept.
    pub fn update_settings(&mut self, settings: PedestalSettings) -> MeshResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.record(ChangeOrigin::User);
        Ok(())
    }

    /// Fits the current subject again to the current pedestal width.
    ///
    /// Returns false when no non-empty subject is loaded.
    pub fn refit(&mut self) -> bool {
        let Some(subject) = &self.subject else {
            return false;
        };
        let Some(plan) = plan_auto_fit(&subject.triangles, self.settings.width) else {
            return false;
        };
        let id = subject.id.clone();
        self.latch.reset();
        self.latch.try_claim(&id);
        plan.apply_to(&mut self.settings);
        self.record(ChangeOrigin::AutoFit);
        true
    }

    /// Composes the scene for the current settings.
    pub fn compose(&self) -> MeshResult<ComposedScene> {
        let pedestal = build_pedestal_with(&self.settings, &self.pedestal_config)?;
        let empty = FlatTriangleList::new();
        let subject = self.subject().unwrap_or(&empty);
        compose(subject, &pedestal, &self.settings)
    }

    /// Scene plus engraving labels for the viewport.
    pub fn preview(&self) -> MeshResult<Preview> {
        Ok(Preview {
            scene: self.compose()?,
            overlay: layout_engraving(&self.settings),
        })
    }

    /// Exports the current scene as binary STL with default options.
    pub fn export_stl(&self) -> MeshResult<Vec<u8>> {
        self.export_stl_with(&StlOptions::default())
    }

    /// Exports the current scene as binary STL.
    pub fn export_stl_with(&self, options: &StlOptions) -> MeshResult<Vec<u8>> {
        write_binary_stl(&self.compose()?, options)
    }

    fn record(&mut self, origin: ChangeOrigin) {
        self.last_change = Some(origin);
        self.revision += 1;
        debug!(?origin, revision = self.revision, "settings changed");
    }
}
