//! # Engraving Text Layer
//!
//! Headline and signature labels shown on the pedestal's top face during
//! preview. They are [`DecorativeOverlay`] values with no triangle data, so
//! they have no way into a [`ComposedScene`](crate::compose::ComposedScene)
//! or the STL writer.

use std::f64::consts::FRAC_PI_2;

use config::constants::{
    ENGRAVING_LIFT, HEADLINE_DEPTH_RATIO, HEADLINE_FONT_RATIO, SIGNATURE_DEPTH_RATIO,
    SIGNATURE_FONT_RATIO,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::settings::PedestalSettings;
use crate::units::mm_to_display;

/// Which line of the engraving a label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelRole {
    Headline,
    Signature,
}

/// One text label placed in display space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    pub role: LabelRole,
    pub text: String,
    /// Anchor (label centre), display units.
    pub position: DVec3,
    /// Glyph height, display units.
    pub font_size: f64,
    /// Rotation about X that lays the text flat, radians.
    pub rotation_x: f64,
}

/// Preview-only decoration drawn over the composed scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecorativeOverlay {
    labels: Vec<TextLabel>,
}

impl DecorativeOverlay {
    /// Returns the labels, headline first.
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Lays out the engraving for the current settings.
///
/// Blank lines produce no label. Labels lie flat just above the top face,
/// centred on X and pushed toward the front edge, sized by the footprint.
///
/// # Example
///
/// ```rust
/// use giftforge_mesh::engraving::layout_engraving;
/// use giftforge_mesh::PedestalSettings;
///
/// let settings = PedestalSettings { text_line1: "Happy 30th".into(), ..Default::default() };
/// let overlay = layout_engraving(&settings);
/// assert_eq!(overlay.labels().len(), 1);
/// assert!(overlay.labels()[0].position.y > 1.0);
/// ```
pub fn layout_engraving(settings: &PedestalSettings) -> DecorativeOverlay {
    let (width, depth) = settings.footprint();
    let (width, depth) = (mm_to_display(width), mm_to_display(depth));
    let top = mm_to_display(settings.height) + ENGRAVING_LIFT;

    let lines = [
        (LabelRole::Headline, &settings.text_line1, HEADLINE_DEPTH_RATIO, HEADLINE_FONT_RATIO),
        (LabelRole::Signature, &settings.text_line2, SIGNATURE_DEPTH_RATIO, SIGNATURE_FONT_RATIO),
    ];

    let labels = lines
        .into_iter()
        .filter(|(_, text, _, _)| !text.trim().is_empty())
        .map(|(role, text, depth_ratio, font_ratio)| TextLabel {
            role,
            text: text.trim().to_string(),
            position: DVec3::new(0.0, top, depth * depth_ratio),
            font_size: width * font_ratio,
            rotation_x: -FRAC_PI_2,
        })
        .collect();

    DecorativeOverlay { labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn with_text(line1: &str, line2: &str) -> PedestalSettings {
        PedestalSettings {
            text_line1: line1.to_string(),
            text_line2: line2.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_lines_have_no_labels() {
        assert!(layout_engraving(&with_text("", "   ")).is_empty());
    }

    #[test]
    fn test_both_lines_are_laid_out_in_order() {
        let overlay = layout_engraving(&with_text("For Sam", "love, Alex"));
        let labels = overlay.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].role, LabelRole::Headline);
        assert_eq!(labels[1].text, "love, Alex");
        // Signature sits nearer the front edge and is smaller.
        assert!(labels[1].position.z > labels[0].position.z);
        assert!(labels[1].font_size < labels[0].font_size);
    }

    #[test]
    fn test_labels_float_just_above_top_face() {
        let settings = PedestalSettings { height: 20.0, ..with_text("Hi", "") };
        let overlay = layout_engraving(&settings);
        let label = &overlay.labels()[0];
        assert_abs_diff_eq!(label.position.y, 2.0 + ENGRAVING_LIFT, epsilon = 1e-12);
        assert_eq!(label.position.x, 0.0);
        assert_abs_diff_eq!(label.font_size, 6.0 * HEADLINE_FONT_RATIO, epsilon = 1e-12);
    }

    #[test]
    fn test_labels_stay_on_the_footprint() {
        let overlay = layout_engraving(&with_text("A", "B"));
        for label in overlay.labels() {
            assert!(label.position.z < 3.0);
        }
    }

    #[test]
    fn test_overlay_serializes_for_the_ui() {
        let json = serde_json::to_string(&layout_engraving(&with_text("Hi", ""))).unwrap();
        assert!(json.contains("\"fontSize\""));
        assert!(json.contains("\"role\":\"headline\""));
    }
}
