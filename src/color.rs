//! HSL colors for ring tinting.
//!
//! Ring colors are picked in HSL with a fixed saturation and lightness and
//! handed to the GPU as linear RGB, since the surface is sRGB and performs
//! the encode on write.

use glam::Vec3;

/// Saturation shared by every ring color.
pub const RING_SATURATION: f32 = 0.98;
/// Lightness shared by every ring color.
pub const RING_LIGHTNESS: f32 = 0.49;

/// A color in hue/saturation/lightness form.
///
/// * `hue` - degrees, wrapped into 0..360
/// * `saturation` - 0.0 (gray) to 1.0 (vivid)
/// * `lightness` - 0.0 (black) to 1.0 (white)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Ring color for a hue: fixed 98% saturation, 49% lightness.
    pub fn ring(hue: f32) -> Self {
        Self::new(hue, RING_SATURATION, RING_LIGHTNESS)
    }

    /// Gamma-encoded sRGB, each channel 0-1.
    pub fn to_srgb(self) -> Vec3 {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }

    /// Linear RGB, each channel 0-1.
    pub fn to_linear(self) -> Vec3 {
        let c = self.to_srgb();
        Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
    }
}

/// Convert HSL to sRGB. Hue is in degrees.
fn hsl_to_rgb(hue: f32, s: f32, l: f32) -> Vec3 {
    let h = if hue.is_finite() { hue.rem_euclid(360.0) / 360.0 } else { 0.0 };
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 0.001
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(Hsl::new(0.0, 1.0, 0.5).to_srgb(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(Hsl::new(120.0, 1.0, 0.5).to_srgb(), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(Hsl::new(240.0, 1.0, 0.5).to_srgb(), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hue_wraps() {
        let a = Hsl::new(360.0, 1.0, 0.5).to_srgb();
        let b = Hsl::new(0.0, 1.0, 0.5).to_srgb();
        assert!(close(a, b));
        assert!(close(Hsl::new(-120.0, 1.0, 0.5).to_srgb(), Hsl::new(240.0, 1.0, 0.5).to_srgb()));
    }

    #[test]
    fn test_gray_when_unsaturated() {
        assert!(close(Hsl::new(200.0, 0.0, 0.25).to_srgb(), Vec3::splat(0.25)));
    }

    #[test]
    fn test_ring_color_is_vivid_red_at_zero() {
        let c = Hsl::ring(0.0).to_srgb();
        // l=0.49, s=0.98: q = 0.9702, p = 0.0098
        assert!((c.x - 0.9702).abs() < 0.001);
        assert!((c.y - 0.0098).abs() < 0.001);
        assert!((c.z - 0.0098).abs() < 0.001);
    }

    #[test]
    fn test_linear_darker_than_srgb() {
        let hsl = Hsl::new(30.0, 0.5, 0.5);
        let srgb = hsl.to_srgb();
        let linear = hsl.to_linear();
        assert!(linear.x <= srgb.x && linear.y <= srgb.y && linear.z <= srgb.z);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 0.0001);
        assert_eq!(srgb_to_linear(0.0), 0.0);
    }
}
