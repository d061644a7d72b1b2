//! # Pedestal Settings
//!
//! The single piece of mutable session state. Lengths are millimetres.

use config::constants::{
    clamp_to, DEFAULT_PEDESTAL_DEPTH_MM, DEFAULT_PEDESTAL_HEIGHT_MM, DEFAULT_PEDESTAL_WIDTH_MM,
    FOOTPRINT_RANGE_MM, HEIGHT_RANGE_MM, MODEL_Z_OFFSET_RANGE_MM, OFFSET_RANGE_MM, SCALE_RANGE,
};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Footprint shape of the pedestal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PedestalShape {
    /// Rectangular prism with rounded vertical edges.
    #[default]
    Box,
    /// Round pedestal of diameter `width`.
    Cylinder,
}

/// User-configurable pedestal and subject placement.
///
/// Serialized in camelCase so the workbench UI can exchange it as JSON.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::{PedestalSettings, PedestalShape};
///
/// let settings: PedestalSettings = serde_json::from_str(
///     r#"{ "shape": "cylinder", "width": 40, "depth": 40, "height": 12 }"#,
/// ).unwrap();
/// assert_eq!(settings.shape, PedestalShape::Cylinder);
/// assert_eq!(settings.scale, 1.0);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PedestalSettings {
    pub shape: PedestalShape,
    /// Footprint width (cylinder diameter), mm.
    pub width: f64,
    /// Footprint depth, mm. Equal to `width` for cylinders.
    pub depth: f64,
    /// Pedestal height, mm.
    pub height: f64,
    /// Uniform subject scale multiplier.
    pub scale: f64,
    /// Height of the subject's local origin above the pedestal top, mm.
    pub offset: f64,
    /// Front/back shift of the subject, mm.
    pub model_z_offset: f64,
    /// Engraved headline, preview only.
    pub text_line1: String,
    /// Engraved signature, preview only.
    pub text_line2: String,
}

impl Default for PedestalSettings {
    fn default() -> Self {
        Self {
            shape: PedestalShape::Box,
            width: DEFAULT_PEDESTAL_WIDTH_MM,
            depth: DEFAULT_PEDESTAL_DEPTH_MM,
            height: DEFAULT_PEDESTAL_HEIGHT_MM,
            scale: 1.0,
            offset: 0.0,
            model_z_offset: 0.0,
            text_line1: String::new(),
            text_line2: String::new(),
        }
    }
}

impl PedestalSettings {
    /// Checks the positive-dimension and finite-value invariants.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidPedestalDimensions`] naming the first bad field.
    pub fn validate(&self) -> MeshResult<()> {
        let (width, depth) = self.footprint();
        let positive = [
            ("width", width),
            ("depth", depth),
            ("height", self.height),
            ("scale", self.scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MeshError::invalid_dimensions(format!(
                    "{name} must be positive and finite: {value}"
                )));
            }
        }
        for (name, value) in [("offset", self.offset), ("modelZOffset", self.model_z_offset)] {
            if !value.is_finite() {
                return Err(MeshError::invalid_dimensions(format!(
                    "{name} must be finite: {value}"
                )));
            }
        }
        Ok(())
    }

    /// Footprint (width, depth) actually used by the generator. Cylinders are
    /// round, so their depth follows the width.
    pub fn footprint(&self) -> (f64, f64) {
        match self.shape {
            PedestalShape::Box => (self.width, self.depth),
            PedestalShape::Cylinder => (self.width, self.width),
        }
    }

    /// Sets the width, keeping a cylinder's depth in step.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        if self.shape == PedestalShape::Cylinder {
            self.depth = width;
        }
        self
    }

    /// Switches shape; a cylinder adopts the width as its depth.
    pub fn with_shape(mut self, shape: PedestalShape) -> Self {
        self.shape = shape;
        if shape == PedestalShape::Cylinder {
            self.depth = self.width;
        }
        self
    }

    /// Returns a copy pulled into the UI slider ranges.
    ///
    /// Non-finite values fall back to the defaults before clamping.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        let width = clamp_to(finite_or(self.width, defaults.width), FOOTPRINT_RANGE_MM);
        let depth = match self.shape {
            PedestalShape::Cylinder => width,
            PedestalShape::Box => clamp_to(finite_or(self.depth, defaults.depth), FOOTPRINT_RANGE_MM),
        };
        Self {
            shape: self.shape,
            width,
            depth,
            height: clamp_to(finite_or(self.height, defaults.height), HEIGHT_RANGE_MM),
            scale: clamp_to(finite_or(self.scale, defaults.scale), SCALE_RANGE),
            offset: clamp_to(finite_or(self.offset, defaults.offset), OFFSET_RANGE_MM),
            model_z_offset: clamp_to(
                finite_or(self.model_z_offset, defaults.model_z_offset),
                MODEL_Z_OFFSET_RANGE_MM,
            ),
            text_line1: self.text_line1.clone(),
            text_line2: self.text_line2.clone(),
        }
    }
}
