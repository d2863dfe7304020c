//! Named presets exposed by the control panel.
//!
//! Themes only rewrite the hue range; camera orientations only move the
//! camera. Neither touches the generator directly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::params::Range;

/// Color theme, mapped to a hue range in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Cyan through magenta to red (190-360).
    #[default]
    Night,
    /// Reds, oranges and yellows (0-60).
    Day,
    /// Greens through blues (150-250).
    Ocean,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Night, Theme::Day, Theme::Ocean];

    /// Hue range this theme samples from.
    pub fn hue_range(self) -> Range {
        match self {
            Theme::Night => Range::new(190.0, 360.0),
            Theme::Day => Range::new(0.0, 60.0),
            Theme::Ocean => Range::new(150.0, 250.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Night => "night",
            Theme::Day => "day",
            Theme::Ocean => "ocean",
        }
    }
}

/// Fixed camera placements. All of them look at (or just past) the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraOrientation {
    #[default]
    Front,
    Above,
    Below,
    /// Sitting at the center of the rings, looking down -Z.
    Inside,
}

/// Distance used by the outside orientations.
const VIEW_DISTANCE: f32 = 12.0;

impl CameraOrientation {
    pub const ALL: [CameraOrientation; 4] = [
        CameraOrientation::Front,
        CameraOrientation::Above,
        CameraOrientation::Below,
        CameraOrientation::Inside,
    ];

    /// Camera eye position for this orientation.
    pub fn position(self) -> Vec3 {
        match self {
            CameraOrientation::Front => Vec3::new(0.0, 0.0, VIEW_DISTANCE),
            CameraOrientation::Above => Vec3::new(0.0, VIEW_DISTANCE, 0.0),
            CameraOrientation::Below => Vec3::new(0.0, -VIEW_DISTANCE, 0.0),
            CameraOrientation::Inside => Vec3::ZERO,
        }
    }

    /// Point the camera looks at.
    pub fn target(self) -> Vec3 {
        match self {
            CameraOrientation::Inside => Vec3::new(0.0, 0.0, -0.5),
            _ => Vec3::ZERO,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CameraOrientation::Front => "front",
            CameraOrientation::Above => "above",
            CameraOrientation::Below => "below",
            CameraOrientation::Inside => "inside",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_hue_ranges() {
        assert_eq!(Theme::Night.hue_range(), Range::new(190.0, 360.0));
        assert_eq!(Theme::Day.hue_range(), Range::new(0.0, 60.0));
        assert_eq!(Theme::Ocean.hue_range(), Range::new(150.0, 250.0));
    }

    #[test]
    fn test_names_match_serialized_form() {
        for theme in Theme::ALL {
            let json = serde_json::to_string(&theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.name()));
        }
        for orientation in CameraOrientation::ALL {
            let json = serde_json::to_string(&orientation).unwrap();
            assert_eq!(json, format!("\"{}\"", orientation.name()));
        }
    }

    #[test]
    fn test_orientations_sit_twelve_units_out() {
        for o in [CameraOrientation::Front, CameraOrientation::Above, CameraOrientation::Below] {
            assert!((o.position().distance(o.target()) - 12.0).abs() < 1e-5);
        }
        let inside = CameraOrientation::Inside;
        assert_eq!(inside.position(), Vec3::ZERO);
        assert_eq!(inside.target(), Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Ocean).unwrap(), "\"ocean\"");
        let o: CameraOrientation = serde_json::from_str("\"inside\"").unwrap();
        assert_eq!(o, CameraOrientation::Inside);
    }
}
