//! # Config Crate
//!
//! Centralized configuration constants for the gift workbench crates.
//! Unit scales, tessellation defaults, slider ranges, binary STL layout and
//! safety limits are defined here so every crate agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MM_PER_DISPLAY_UNIT, PedestalConfig};
//!
//! let height_in_display_units = 10.0 / MM_PER_DISPLAY_UNIT;
//! assert_eq!(height_in_display_units, 1.0);
//!
//! let tessellation = PedestalConfig::default();
//! assert!(tessellation.cylinder_segments >= 32);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Validated Tunables**: Runtime configuration is checked on construction

pub mod constants;

#[cfg(test)]
mod tests;
