//! # Mesh Errors
//!
//! Error types for normalization, pedestal generation and export.
//!
//! ## Error Policy
//!
//! - Malformed input is rejected, never reinterpreted
//! - Every failure is deterministic for its input, so callers do not retry
//! - Numerical edge cases (degenerate normals) are tolerated, not errors

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while preparing or exporting a scene.
///
/// ## Example
///
/// ```rust
/// use giftforge_mesh::{build_pedestal, MeshError, PedestalSettings};
///
/// let settings = PedestalSettings { height: 0.0, ..PedestalSettings::default() };
/// match build_pedestal(&settings) {
///     Err(MeshError::InvalidPedestalDimensions { message }) => assert!(message.contains("height")),
///     other => panic!("expected invalid dimensions, got {other:?}"),
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Input buffers cannot be flattened safely (unexpected stride,
    /// interleaving, quantization, out-of-range indices).
    #[error("Unsupported geometry format: {message}")]
    UnsupportedGeometryFormat { message: String },

    /// Pedestal settings violate the positive-dimension invariants.
    #[error("Invalid pedestal dimensions: {message}")]
    InvalidPedestalDimensions { message: String },

    /// Export attempted with neither subject nor pedestal triangles.
    #[error("Scene is empty: nothing to export")]
    EmptyScene,

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// A placed vertex does not fit in an STL `REAL32`.
    #[error("Coordinate out of range: {message}")]
    CoordinateOutOfRange { message: String },

    /// Buffer is not a well-formed binary STL.
    #[error("Malformed STL: {message}")]
    MalformedStl { message: String },
}

impl MeshError {
    /// Creates an unsupported geometry format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedGeometryFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid pedestal dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidPedestalDimensions {
            message: message.into(),
        }
    }

    /// Creates a coordinate out of range error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::CoordinateOutOfRange {
            message: message.into(),
        }
    }

    /// Creates a malformed STL error.
    pub fn malformed_stl(message: impl Into<String>) -> Self {
        Self::MalformedStl {
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::unsupported("stride 2 is smaller than 3 components");
        assert!(err.to_string().contains("Unsupported geometry format"));
        assert!(err.to_string().contains("stride 2"));

        let err = MeshError::TooManyTriangles { count: 11, max: 10 };
        assert_eq!(err.to_string(), "Too many triangles: 11 (max: 10)");
    }

    /// Errors cross the WASM boundary and may be moved between workers.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
