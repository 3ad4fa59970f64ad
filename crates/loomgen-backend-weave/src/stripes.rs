//! Stripe layout synthesis.
//!
//! Partitions the artifact height into contiguous colored stripes. The
//! serialized form uses the compact field names of the original on-chain
//! encoding (`y`, `h`, `pc`, `sc`, `wt`, `wv`).

use loomgen_spec::{HexColor, Palette};
use serde::{Deserialize, Serialize};

use crate::generate::GenerateError;
use crate::rng::SeededRng;

/// Per-stripe rendering style. Declaration order is the trait tie-break
/// order, most common first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaveType {
    #[serde(rename = "s")]
    Solid,
    #[serde(rename = "t")]
    Textured,
    #[serde(rename = "m")]
    Mixed,
}

impl WeaveType {
    pub fn name(&self) -> &'static str {
        match self {
            WeaveType::Solid => "Solid",
            WeaveType::Textured => "Textured",
            WeaveType::Mixed => "Mixed",
        }
    }
}

/// One horizontal band of the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stripe {
    /// Top edge offset.
    #[serde(rename = "y")]
    pub y_offset: f64,
    /// Band height. Always positive; the final stripe is clipped so the
    /// layout total equals the artifact height exactly.
    #[serde(rename = "h")]
    pub height: f64,
    #[serde(rename = "pc")]
    pub primary: HexColor,
    #[serde(rename = "sc", default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<HexColor>,
    #[serde(rename = "wt")]
    pub weave: WeaveType,
    /// How much the weave varies, in [0.1, 0.5].
    #[serde(rename = "wv")]
    pub warp_variation: f64,
}

/// Ordered, contiguous, non-overlapping stripe sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StripeLayout {
    stripes: Vec<Stripe>,
}

impl StripeLayout {
    pub fn stripes(&self) -> &[Stripe] {
        &self.stripes
    }

    pub fn len(&self) -> usize {
        self.stripes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stripes.is_empty()
    }

    /// Sum of stripe heights. Equals the requested total height exactly.
    pub fn total_height(&self) -> f64 {
        self.stripes.iter().map(|s| s.height).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stripe> {
        self.stripes.iter()
    }
}

/// Stripe height range for each density mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DensityMode {
    /// Many thin stripes, heights in [15, 35].
    Narrow,
    /// Fewer thick stripes, heights in [50, 90].
    Wide,
    /// Varied heights in [20, 80] with sub-band biasing.
    Mixed,
}

impl DensityMode {
    fn from_roll(roll: f64) -> Self {
        if roll < 0.2 {
            DensityMode::Narrow
        } else if roll < 0.4 {
            DensityMode::Wide
        } else {
            DensityMode::Mixed
        }
    }

    fn height_range(&self) -> (f64, f64) {
        match self {
            DensityMode::Narrow => (15.0, 35.0),
            DensityMode::Wide => (50.0, 90.0),
            DensityMode::Mixed => (20.0, 80.0),
        }
    }
}

/// Generate a stripe layout covering `total_height` exactly.
///
/// Draw order per stripe is part of the artifact contract: (mixed mode only)
/// variation roll, then height, primary color, secondary chance, secondary
/// color when the chance hit, weave roll, warp variation.
pub fn generate_stripe_layout(
    rng: &mut SeededRng,
    total_height: f64,
    palette: &Palette,
) -> Result<StripeLayout, GenerateError> {
    if total_height <= 0.0 {
        return Err(GenerateError::InvalidDimension(total_height));
    }

    let mode = DensityMode::from_roll(rng.next_f64());
    let (min_height, max_height) = mode.height_range();

    let mut stripes = Vec::new();
    let mut current_y = 0.0_f64;

    while current_y < total_height {
        let mut height = if mode == DensityMode::Mixed {
            let variation = rng.next_f64();
            if variation < 0.3 {
                rng.range(min_height, min_height + 20.0)
            } else if variation < 0.6 {
                rng.range(min_height + 15.0, max_height - 15.0)
            } else {
                rng.range(max_height - 25.0, max_height)
            }
        } else {
            rng.range(min_height, max_height)
        };

        // Clip the final stripe so the layout total is exact.
        if current_y + height > total_height {
            height = total_height - current_y;
        }

        let primary = *rng.pick(&palette.colors);
        let secondary = if rng.chance(0.15) {
            Some(*rng.pick(&palette.colors))
        } else {
            None
        };

        let weave_roll = rng.next_f64();
        let weave = if weave_roll < 0.6 {
            WeaveType::Solid
        } else if weave_roll < 0.8 {
            WeaveType::Textured
        } else {
            WeaveType::Mixed
        };

        stripes.push(Stripe {
            y_offset: current_y,
            height,
            primary,
            secondary,
            weave,
            warp_variation: rng.range(0.1, 0.5),
        });

        current_y += height;
    }

    Ok(StripeLayout { stripes })
}
