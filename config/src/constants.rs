//! Centralized configuration values shared across the gift workbench crates.
//!
//! Each public item documents its purpose so that downstream crates can stay
//! declarative and avoid scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Squared edge-cross length below which a triangle is treated as degenerate
/// and its facet normal is written as zeros.
pub const DEGENERATE_NORMAL_EPSILON: f64 = 1e-20;

// =============================================================================
// UNIT CONSTANTS
// =============================================================================

/// Millimetres represented by one display-space unit.
///
/// Display coordinates are millimetres divided by this factor, which keeps
/// typical gift models at a convenient on-screen size.
///
/// # Example
///
/// ```rust
/// use config::constants::MM_PER_DISPLAY_UNIT;
///
/// let pedestal_height_mm = 10.0;
/// assert_eq!(pedestal_height_mm / MM_PER_DISPLAY_UNIT, 1.0);
/// ```
pub const MM_PER_DISPLAY_UNIT: f64 = 10.0;

// =============================================================================
// PEDESTAL TESSELLATION
// =============================================================================

/// Default angular resolution for cylindrical pedestals.
pub const DEFAULT_CYLINDER_SEGMENTS: u32 = 64;

/// Lowest angular resolution accepted for cylindrical pedestals. Anything
/// coarser prints visibly faceted.
pub const MIN_CYLINDER_SEGMENTS: u32 = 32;

/// Upper bound for cylinder tessellation.
pub const MAX_CYLINDER_SEGMENTS: u32 = 1024;

/// Segments used for each rounded corner of a box pedestal.
pub const DEFAULT_CORNER_SEGMENTS: u32 = 8;

/// Fillet radius of a box pedestal's vertical edges, as a fraction of the
/// smaller footprint dimension.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_FILLET_RATIO;
///
/// let (width, depth) = (60.0_f64, 40.0_f64);
/// let radius = width.min(depth) * DEFAULT_FILLET_RATIO;
/// assert!((radius - 4.0).abs() < 1e-12);
/// ```
pub const DEFAULT_FILLET_RATIO: f64 = 0.1;

// =============================================================================
// AUTO-FIT
// =============================================================================

/// Fraction of the pedestal width the subject's largest dimension is scaled
/// to when a new mesh is auto-fitted.
pub const AUTO_FIT_WIDTH_RATIO: f64 = 0.7;

// =============================================================================
// PEDESTAL SETTINGS DEFAULTS AND INPUT RANGES
// =============================================================================

/// Default pedestal footprint width in millimetres.
pub const DEFAULT_PEDESTAL_WIDTH_MM: f64 = 60.0;

/// Default pedestal footprint depth in millimetres.
pub const DEFAULT_PEDESTAL_DEPTH_MM: f64 = 60.0;

/// Default pedestal height in millimetres.
pub const DEFAULT_PEDESTAL_HEIGHT_MM: f64 = 10.0;

/// Slider range for the footprint width and depth, in millimetres. The upper
/// bound is the printer's usable bed size.
pub const FOOTPRINT_RANGE_MM: (f64, f64) = (20.0, 100.0);

/// Slider range for the pedestal height, in millimetres.
pub const HEIGHT_RANGE_MM: (f64, f64) = (5.0, 30.0);

/// Slider range for the subject lift above the pedestal top, in millimetres.
pub const OFFSET_RANGE_MM: (f64, f64) = (-50.0, 50.0);

/// Slider range for the subject front/back shift, in millimetres.
pub const MODEL_Z_OFFSET_RANGE_MM: (f64, f64) = (-50.0, 50.0);

/// Slider range for the subject scale multiplier.
pub const SCALE_RANGE: (f64, f64) = (0.1, 3.0);

// =============================================================================
// ENGRAVING LAYOUT
// =============================================================================

/// Height above the pedestal top face at which engraving labels float, in
/// display units. Keeps the labels from z-fighting with the top face.
pub const ENGRAVING_LIFT: f64 = 0.01;

/// Headline font size as a fraction of the footprint width.
pub const HEADLINE_FONT_RATIO: f64 = 0.08;

/// Signature font size as a fraction of the footprint width.
pub const SIGNATURE_FONT_RATIO: f64 = 0.05;

/// Distance of the headline from the top-face centre toward the front edge,
/// as a fraction of the footprint depth.
pub const HEADLINE_DEPTH_RATIO: f64 = 0.15;

/// Distance of the signature from the top-face centre toward the front edge,
/// as a fraction of the footprint depth.
pub const SIGNATURE_DEPTH_RATIO: f64 = 0.32;

// =============================================================================
// BINARY STL LAYOUT
// =============================================================================

/// Size of the free-form binary STL header.
pub const STL_HEADER_BYTES: usize = 80;

/// Size of the little-endian triangle count that follows the header.
pub const STL_COUNT_BYTES: usize = 4;

/// Size of one triangle record: normal, three vertices, attribute word.
pub const STL_TRIANGLE_BYTES: usize = 50;

/// Signature written at the start of every exported header.
pub const STL_HEADER_SIGNATURE: &str = "giftforge binary STL (mm, Z up)";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of triangles accepted in a normalized mesh or an export.
///
/// Safety limit that keeps a runaway reconstruction from exhausting the
/// browser heap.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// VALIDATED TESSELLATION CONFIG
// =============================================================================

/// Tessellation parameters for pedestal generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedestalConfig {
    /// Angular resolution of cylindrical pedestals.
    pub cylinder_segments: u32,
    /// Segments per rounded corner of box pedestals.
    pub corner_segments: u32,
    /// Fillet radius as a fraction of the smaller footprint dimension.
    pub fillet_ratio: f64,
}

impl PedestalConfig {
    /// Builds a configuration, rejecting tessellation that would print
    /// faceted or produce a self-intersecting outline.
    ///
    /// # Examples
    /// ```
    /// use config::constants::PedestalConfig;
    /// let cfg = PedestalConfig::new(96, 6, 0.15).expect("valid config");
    /// assert_eq!(cfg.cylinder_segments, 96);
    /// assert!(PedestalConfig::new(16, 6, 0.15).is_err());
    /// ```
    pub fn new(
        cylinder_segments: u32,
        corner_segments: u32,
        fillet_ratio: f64,
    ) -> Result<Self, ConfigError> {
        if !(MIN_CYLINDER_SEGMENTS..=MAX_CYLINDER_SEGMENTS).contains(&cylinder_segments) {
            return Err(ConfigError::InvalidSegments(cylinder_segments));
        }
        if corner_segments == 0 {
            return Err(ConfigError::InvalidCornerSegments(corner_segments));
        }
        if !(fillet_ratio > 0.0 && fillet_ratio < 0.5) {
            return Err(ConfigError::InvalidFilletRatio(fillet_ratio));
        }
        Ok(Self {
            cylinder_segments,
            corner_segments,
            fillet_ratio,
        })
    }
}

impl Default for PedestalConfig {
    fn default() -> Self {
        Self {
            cylinder_segments: DEFAULT_CYLINDER_SEGMENTS,
            corner_segments: DEFAULT_CORNER_SEGMENTS,
            fillet_ratio: DEFAULT_FILLET_RATIO,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the cylinder resolution is outside the printable range.
    InvalidSegments(u32),
    /// Raised when a rounded corner would have no arc segments.
    InvalidCornerSegments(u32),
    /// Raised when the fillet ratio is not strictly between 0 and 0.5.
    InvalidFilletRatio(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => write!(
                f,
                "cylinder_segments must be within {MIN_CYLINDER_SEGMENTS}..={MAX_CYLINDER_SEGMENTS}: {value}"
            ),
            ConfigError::InvalidCornerSegments(value) => {
                write!(f, "corner_segments must be >= 1: {value}")
            }
            ConfigError::InvalidFilletRatio(value) => {
                write!(f, "fillet_ratio must be within (0, 0.5): {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Clamps `value` into an inclusive `(min, max)` range tuple.
///
/// # Example
///
/// ```rust
/// use config::constants::{clamp_to, HEIGHT_RANGE_MM};
///
/// assert_eq!(clamp_to(50.0, HEIGHT_RANGE_MM), 30.0);
/// assert_eq!(clamp_to(12.0, HEIGHT_RANGE_MM), 12.0);
/// ```
#[inline]
pub fn clamp_to(value: f64, range: (f64, f64)) -> f64 {
    value.clamp(range.0, range.1)
}
