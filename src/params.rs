//! Generation parameters.
//!
//! [`GenerationParameters`] is an immutable snapshot handed to the generator.
//! Edits go through [`GenerationParameters::apply`], which merges one
//! [`ParameterChange`] field-by-field and returns a new snapshot.
//!
//! Parameters serialize to JSON so a tuned field can be saved and reloaded:
//!
//! ```json
//! {
//!   "num_rings": 10,
//!   "count": [1000.0, 10000.0],
//!   "radius": [3.0, 7.0],
//!   "y": [-10.0, 10.0],
//!   "hue": [190.0, 360.0],
//!   "rotation_scaler": 0.05,
//!   "theme": "night",
//!   "camera_orientation": "front"
//! }
//! ```

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::presets::{CameraOrientation, Theme};

/// A closed `[min, max]` interval with `min <= max` guaranteed.
///
/// Built with [`Range::new`], an inverted pair collapses to the zero-width
/// range at `min`; built with [`Range::unordered`], the pair is swapped.
/// Non-finite bounds become `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Range {
    min: f32,
    max: f32,
}

impl Range {
    /// Range from `min` to `max`. If `max < min` the range is `[min, min]`.
    pub fn new(min: f32, max: f32) -> Self {
        let min = finite_or_zero(min);
        let max = finite_or_zero(max);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Range spanning `a` and `b` in either order.
    pub fn unordered(a: f32, b: f32) -> Self {
        let a = finite_or_zero(a);
        let b = finite_or_zero(b);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Zero-width range at `value`.
    pub fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Same range with a new lower bound; `max` is raised to match if needed.
    pub fn with_min(self, min: f32) -> Self {
        let min = finite_or_zero(min);
        Self {
            min,
            max: self.max.max(min),
        }
    }

    /// Same range with a new upper bound; `min` is lowered to match if needed.
    pub fn with_max(self, max: f32) -> Self {
        let max = finite_or_zero(max);
        Self {
            min: self.min.min(max),
            max,
        }
    }

    /// Draw a value uniformly from the range. Zero-width ranges return `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        sample_between(self.min, self.max, rng)
    }
}

/// Uniform value in `[lo, hi]`, or `lo` when the interval is empty.
///
/// Interpolates instead of using `hi - lo`, which overflows for finite
/// bounds of opposite sign near `f32::MAX`.
pub(crate) fn sample_between<R: Rng + ?Sized>(lo: f32, hi: f32, rng: &mut R) -> f32 {
    if hi > lo {
        let t: f32 = rng.gen();
        (lo * (1.0 - t) + hi * t).clamp(lo, hi)
    } else {
        lo
    }
}

impl From<(f32, f32)> for Range {
    fn from((min, max): (f32, f32)) -> Self {
        Range::new(min, max)
    }
}

impl From<Range> for (f32, f32) {
    fn from(range: Range) -> Self {
        (range.min, range.max)
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// The y band is order-independent, so it round-trips through `Range::unordered`.
mod unordered_range {
    use super::Range;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(range: &Range, serializer: S) -> Result<S::Ok, S::Error> {
        (range.min(), range.max()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Range, D::Error> {
        let (a, b) = <(f32, f32)>::deserialize(deserializer)?;
        Ok(Range::unordered(a, b))
    }
}

fn default_rotation_scaler() -> f32 {
    0.05
}

/// Complete parameter set for one generation pass.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationParameters {
    /// Number of independent rings to create.
    pub num_rings: u32,
    /// Point count per ring, sampled then rounded.
    pub count: Range,
    /// Ring radius.
    pub radius: Range,
    /// Vertical band bounds. Each ring draws its floor and ceiling from here.
    #[serde(with = "unordered_range")]
    pub y: Range,
    /// Hue in degrees.
    pub hue: Range,
    /// Radians per second of spin applied to every ring.
    #[serde(default = "default_rotation_scaler")]
    pub rotation_scaler: f32,
    /// Theme that last set `hue`.
    pub theme: Theme,
    /// Current camera placement.
    pub camera_orientation: CameraOrientation,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            num_rings: 10,
            count: Range::new(1000.0, 10_000.0),
            radius: Range::new(3.0, 7.0),
            y: Range::unordered(-10.0, 10.0),
            hue: Theme::Night.hue_range(),
            rotation_scaler: default_rotation_scaler(),
            theme: Theme::Night,
            camera_orientation: CameraOrientation::Front,
        }
    }
}

impl GenerationParameters {
    /// Return a new snapshot with `change` merged in.
    pub fn apply(&self, change: ParameterChange) -> Self {
        let mut next = self.clone();
        match change {
            ParameterChange::NumRings(n) => next.num_rings = n,
            ParameterChange::CountMin(v) => next.count = next.count.with_min(v),
            ParameterChange::CountMax(v) => next.count = next.count.with_max(v),
            ParameterChange::RadiusMin(v) => next.radius = next.radius.with_min(v),
            ParameterChange::RadiusMax(v) => next.radius = next.radius.with_max(v),
            ParameterChange::YMin(v) => next.y = Range::unordered(v, next.y.max()),
            ParameterChange::YMax(v) => next.y = Range::unordered(next.y.min(), v),
            ParameterChange::HueMin(v) => next.hue = next.hue.with_min(v),
            ParameterChange::HueMax(v) => next.hue = next.hue.with_max(v),
            ParameterChange::RotationScaler(v) => next.rotation_scaler = finite_or_zero(v),
            ParameterChange::Theme(theme) => {
                next.theme = theme;
                next.hue = theme.hue_range();
            }
            ParameterChange::CameraOrientation(o) => next.camera_orientation = o,
        }
        next
    }

    /// Save the parameters to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// A single edit coming from the control panel or keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChange {
    NumRings(u32),
    CountMin(f32),
    CountMax(f32),
    RadiusMin(f32),
    RadiusMax(f32),
    YMin(f32),
    YMax(f32),
    HueMin(f32),
    HueMax(f32),
    RotationScaler(f32),
    Theme(Theme),
    CameraOrientation(CameraOrientation),
}

impl ParameterChange {
    /// Whether this edit invalidates the current rings.
    ///
    /// Rotation speed and camera placement are read every frame and need no
    /// new geometry.
    pub fn regenerates(&self) -> bool {
        !matches!(
            self,
            ParameterChange::RotationScaler(_) | ParameterChange::CameraOrientation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_range_new_collapses_inverted() {
        let r = Range::new(5.0, 3.0);
        assert_eq!(r.min(), 5.0);
        assert_eq!(r.max(), 5.0);
        assert_eq!(r.width(), 0.0);
    }

    #[test]
    fn test_range_unordered_swaps() {
        let r = Range::unordered(1.0, -1.0);
        assert_eq!(r.min(), -1.0);
        assert_eq!(r.max(), 1.0);
    }

    #[test]
    fn test_range_non_finite_becomes_zero() {
        let r = Range::new(f32::NAN, f32::INFINITY);
        assert_eq!(r, Range::fixed(0.0));
    }

    #[test]
    fn test_range_sample_stays_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let r = Range::new(-2.0, 3.5);
        for _ in 0..1000 {
            assert!(r.contains(r.sample(&mut rng)));
        }
    }

    #[test]
    fn test_huge_range_samples_without_overflow() {
        let mut rng = StdRng::seed_from_u64(11);
        let r = Range::new(-3.0e38, 3.0e38);
        assert!(r.width().is_infinite());
        for _ in 0..1000 {
            let v = r.sample(&mut rng);
            assert!(v.is_finite());
            assert!(r.contains(v));
        }
        let r = Range::new(-f32::MAX, f32::MAX);
        assert!(r.sample(&mut rng).is_finite());
    }

    #[test]
    fn test_zero_width_sample_returns_min() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Range::fixed(4.0).sample(&mut rng), 4.0);
        assert_eq!(Range::new(9.0, 2.0).sample(&mut rng), 9.0);
    }

    #[test]
    fn test_with_min_pushes_max() {
        let r = Range::new(0.0, 60.0).with_min(90.0);
        assert_eq!((r.min(), r.max()), (90.0, 90.0));
    }

    #[test]
    fn test_with_max_pulls_min() {
        let r = Range::new(0.0, 60.0).with_max(-5.0);
        assert_eq!((r.min(), r.max()), (-5.0, -5.0));
        let r = Range::new(0.0, 60.0).with_max(30.0);
        assert_eq!((r.min(), r.max()), (0.0, 30.0));
    }

    #[test]
    fn test_radius_max_below_min_moves_both() {
        let p = GenerationParameters::default().apply(ParameterChange::RadiusMax(2.0));
        assert_eq!(p.radius, Range::fixed(2.0));
        let p = p.apply(ParameterChange::RadiusMax(1.0));
        assert_eq!(p.radius, Range::fixed(1.0));
    }

    #[test]
    fn test_defaults() {
        let p = GenerationParameters::default();
        assert_eq!(p.num_rings, 10);
        assert_eq!(p.count, Range::new(1000.0, 10_000.0));
        assert_eq!(p.radius, Range::new(3.0, 7.0));
        assert_eq!(p.y, Range::new(-10.0, 10.0));
        assert_eq!(p.hue, Range::new(190.0, 360.0));
        assert!((p.rotation_scaler - 0.05).abs() < f32::EPSILON);
        assert_eq!(p.theme, Theme::Night);
        assert_eq!(p.camera_orientation, CameraOrientation::Front);
    }

    #[test]
    fn test_apply_changes_only_named_field() {
        let p = GenerationParameters::default();
        let q = p.apply(ParameterChange::RadiusMax(20.0));
        assert_eq!(q.radius, Range::new(3.0, 20.0));
        assert_eq!(q.num_rings, p.num_rings);
        assert_eq!(q.hue, p.hue);
        // original snapshot untouched
        assert_eq!(p.radius, Range::new(3.0, 7.0));

        let q = p.apply(ParameterChange::NumRings(3));
        assert_eq!(q.num_rings, 3);
        assert_eq!(q.radius, p.radius);
    }

    #[test]
    fn test_apply_theme_sets_hue() {
        let p = GenerationParameters::default().apply(ParameterChange::Theme(Theme::Day));
        assert_eq!(p.theme, Theme::Day);
        assert_eq!(p.hue, Range::new(0.0, 60.0));
        let p = p.apply(ParameterChange::Theme(Theme::Ocean));
        assert_eq!(p.hue, Range::new(150.0, 250.0));
    }

    #[test]
    fn test_apply_y_is_order_independent() {
        let p = GenerationParameters::default().apply(ParameterChange::YMin(20.0));
        assert_eq!(p.y, Range::new(10.0, 20.0));
    }

    #[test]
    fn test_regenerates() {
        assert!(ParameterChange::NumRings(2).regenerates());
        assert!(ParameterChange::Theme(Theme::Ocean).regenerates());
        assert!(!ParameterChange::RotationScaler(1.0).regenerates());
        assert!(!ParameterChange::CameraOrientation(CameraOrientation::Above).regenerates());
    }

    #[test]
    fn test_json_partial_and_normalized() {
        let p: GenerationParameters =
            serde_json::from_str(r#"{ "num_rings": 2, "count": [50.0, 10.0], "y": [3.0, -3.0] }"#)
                .unwrap();
        assert_eq!(p.num_rings, 2);
        assert_eq!(p.count, Range::fixed(50.0));
        assert_eq!(p.y, Range::new(-3.0, 3.0));
        assert_eq!(p.radius, GenerationParameters::default().radius);
        assert!((p.rotation_scaler - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rings.json");
        let p = GenerationParameters::default()
            .apply(ParameterChange::Theme(Theme::Ocean))
            .apply(ParameterChange::NumRings(4));
        p.save(&path).unwrap();
        assert_eq!(GenerationParameters::load(&path).unwrap(), p);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GenerationParameters::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
