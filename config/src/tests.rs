//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_degenerate_epsilon_is_tiny() {
    assert!(DEGENERATE_NORMAL_EPSILON < EPSILON);
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[test]
fn test_display_unit_is_ten_millimetres() {
    assert_eq!(MM_PER_DISPLAY_UNIT, 10.0);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_default_cylinder_segments_meets_minimum() {
    assert!(DEFAULT_CYLINDER_SEGMENTS >= MIN_CYLINDER_SEGMENTS);
    assert!(MIN_CYLINDER_SEGMENTS >= 32);
}

#[test]
fn test_default_pedestal_config_is_valid() {
    let cfg = PedestalConfig::default();
    let rebuilt = PedestalConfig::new(cfg.cylinder_segments, cfg.corner_segments, cfg.fillet_ratio);
    assert_eq!(rebuilt, Ok(cfg));
}

#[test]
fn test_pedestal_config_rejects_coarse_cylinders() {
    assert_eq!(
        PedestalConfig::new(31, 8, 0.1).unwrap_err(),
        ConfigError::InvalidSegments(31)
    );
}

#[test]
fn test_pedestal_config_rejects_zero_corner_segments() {
    assert_eq!(
        PedestalConfig::new(64, 0, 0.1).unwrap_err(),
        ConfigError::InvalidCornerSegments(0)
    );
}

#[test]
fn test_pedestal_config_rejects_out_of_range_fillet() {
    assert!(PedestalConfig::new(64, 8, 0.0).is_err());
    assert!(PedestalConfig::new(64, 8, 0.5).is_err());
    assert!(PedestalConfig::new(64, 8, f64::NAN).is_err());
}

#[test]
fn test_config_error_messages_name_the_field() {
    assert!(ConfigError::InvalidSegments(3).to_string().contains("cylinder_segments"));
    assert!(ConfigError::InvalidFilletRatio(0.9).to_string().contains("fillet_ratio"));
}

// =============================================================================
// RANGE TESTS
// =============================================================================

#[test]
fn test_defaults_inside_slider_ranges() {
    assert_eq!(clamp_to(DEFAULT_PEDESTAL_WIDTH_MM, FOOTPRINT_RANGE_MM), DEFAULT_PEDESTAL_WIDTH_MM);
    assert_eq!(clamp_to(DEFAULT_PEDESTAL_DEPTH_MM, FOOTPRINT_RANGE_MM), DEFAULT_PEDESTAL_DEPTH_MM);
    assert_eq!(clamp_to(DEFAULT_PEDESTAL_HEIGHT_MM, HEIGHT_RANGE_MM), DEFAULT_PEDESTAL_HEIGHT_MM);
}

#[test]
fn test_ranges_keep_dimensions_positive() {
    assert!(FOOTPRINT_RANGE_MM.0 > 0.0);
    assert!(HEIGHT_RANGE_MM.0 > 0.0);
    assert!(SCALE_RANGE.0 > 0.0);
}

// =============================================================================
// STL LAYOUT TESTS
// =============================================================================

#[test]
fn test_stl_record_layout() {
    assert_eq!(STL_HEADER_BYTES + STL_COUNT_BYTES, 84);
    // normal + 3 vertices (4 * 3 * f32) + u16 attribute
    assert_eq!(STL_TRIANGLE_BYTES, 4 * 3 * 4 + 2);
}

#[test]
fn test_header_signature_fits() {
    assert!(STL_HEADER_SIGNATURE.len() <= STL_HEADER_BYTES);
    // Binary files must not start with "solid" or some readers treat them as ASCII.
    assert!(!STL_HEADER_SIGNATURE.starts_with("solid"));
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(!approx_zero(0.1));
}
