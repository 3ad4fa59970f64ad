//! Color math for weave rendering.
//!
//! Channels are f64 on the 0-255 scale because the weave math is specified in
//! that space: per-cell jitter of +/-15 per channel, mean-luminance ink
//! switching at 128, and clamping to [0, 255]. Conversion to 8-bit happens
//! only at the surface boundary.

use loomgen_spec::HexColor;
use serde::{Deserialize, Serialize};

/// An RGB color with f64 channels in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::new(255.0, 255.0, 255.0)
    }

    /// Unweighted mean of the three channels. The weave uses this (not a
    /// perceptual weighting) to decide light-vs-dark ink, matching the
    /// original artifact math.
    #[inline]
    pub fn mean_luminance(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Linear interpolation toward another color.
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Multiply all channels by a scalar.
    pub fn scale(&self, factor: f64) -> Rgb {
        Rgb::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Clamp all channels to [0, 255].
    pub fn clamp(&self) -> Rgb {
        Rgb {
            r: self.r.clamp(0.0, 255.0),
            g: self.g.clamp(0.0, 255.0),
            b: self.b.clamp(0.0, 255.0),
        }
    }

    /// Convert to 8-bit channels, rounding.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [
            c.r.round() as u8,
            c.g.round() as u8,
            c.b.round() as u8,
        ]
    }
}

impl From<HexColor> for Rgb {
    fn from(hex: HexColor) -> Self {
        Rgb::new(hex.r() as f64, hex.g() as f64, hex.b() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        let c: Rgb = HexColor([255, 140, 0]).into();
        assert_eq!(c, Rgb::new(255.0, 140.0, 0.0));
    }

    #[test]
    fn mean_luminance_is_unweighted() {
        let c = Rgb::new(30.0, 60.0, 90.0);
        assert!((c.mean_luminance() - 60.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_bounds_channels() {
        let c = Rgb::new(-10.0, 260.0, 128.0).clamp();
        assert_eq!(c, Rgb::new(0.0, 255.0, 128.0));
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Rgb::black().lerp(&Rgb::white(), 0.5);
        assert!((mid.r - 127.5).abs() < 1e-12);
    }

    #[test]
    fn to_rgb8_rounds() {
        assert_eq!(Rgb::new(0.4, 0.6, 254.5).to_rgb8(), [0, 1, 255]);
    }
}
