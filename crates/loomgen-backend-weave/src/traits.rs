//! Derived trait and rarity metadata.
//!
//! Pure aggregation over the finished layouts: no randomness, so computing
//! traits twice over the same inputs yields identical results.

use std::collections::BTreeSet;

use loomgen_spec::{Palette, RarityTier};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::stripes::{StripeLayout, WeaveType};
use crate::text::TextLayout;

/// Overall artifact complexity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl Complexity {
    pub fn name(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Moderate => "Moderate",
            Complexity::Complex => "Complex",
            Complexity::VeryComplex => "Very Complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How much text the artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDensity {
    None,
    Sparse,
    Moderate,
    Dense,
    Packed,
}

impl std::fmt::Display for TextDensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TextDensity::None => "None",
            TextDensity::Sparse => "Sparse",
            TextDensity::Moderate => "Moderate",
            TextDensity::Dense => "Dense",
            TextDensity::Packed => "Packed",
        })
    }
}

/// Complexity bucketing thresholds, applied to the combined score
/// `stripe_count + character_count`.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityThresholds {
    pub simple_below: usize,
    pub moderate_below: usize,
    pub complex_below: usize,
}

impl Default for ComplexityThresholds {
    fn default() -> Self {
        Self {
            simple_below: 20,
            moderate_below: 35,
            complex_below: 50,
        }
    }
}

impl ComplexityThresholds {
    fn bucket(&self, score: usize) -> Complexity {
        if score < self.simple_below {
            Complexity::Simple
        } else if score < self.moderate_below {
            Complexity::Moderate
        } else if score < self.complex_below {
            Complexity::Complex
        } else {
            Complexity::VeryComplex
        }
    }
}

/// The flat trait record emitted per artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitSet {
    pub stripe_count: usize,
    pub text_row_count: usize,
    pub character_count: usize,
    pub palette_name: String,
    pub palette_rarity_tier: RarityTier,
    pub color_variety: usize,
    pub complexity: Complexity,
    pub pattern_type: String,
    pub text_density: TextDensity,
    pub warp_thickness: u32,
    pub text_row_rarity: RarityTier,
    pub character_rarity: RarityTier,
    pub stripe_count_rarity: RarityTier,
}

/// Compute the trait set for one artifact.
pub fn compute_traits(
    palette: &Palette,
    stripes: &StripeLayout,
    _text: &TextLayout,
    text_rows: &[String],
    warp_thickness: u32,
    thresholds: &ComplexityThresholds,
) -> TraitSet {
    let stripe_count = stripes.len();
    let text_row_count = text_rows.iter().filter(|r| !r.is_empty()).count();
    let character_count: usize = text_rows
        .iter()
        .map(|row| row.chars().filter(|c| *c != ' ').count())
        .sum();

    let mut colors = BTreeSet::new();
    for stripe in stripes.iter() {
        colors.insert(stripe.primary.0);
        if let Some(sc) = stripe.secondary {
            colors.insert(sc.0);
        }
    }

    TraitSet {
        stripe_count,
        text_row_count,
        character_count,
        palette_name: palette.name.clone(),
        palette_rarity_tier: palette.rarity,
        color_variety: colors.len(),
        complexity: thresholds.bucket(stripe_count + character_count),
        pattern_type: dominant_weave(stripes).name().to_string(),
        text_density: text_density(character_count),
        warp_thickness,
        text_row_rarity: text_row_rarity(text_row_count),
        character_rarity: character_rarity(character_count),
        stripe_count_rarity: stripe_count_rarity(stripe_count),
    }
}

/// Majority vote over stripe weave types. Ties break in declaration order:
/// Solid beats Textured beats Mixed.
fn dominant_weave(stripes: &StripeLayout) -> WeaveType {
    let mut counts = [0usize; 3];
    for stripe in stripes.iter() {
        let index = match stripe.weave {
            WeaveType::Solid => 0,
            WeaveType::Textured => 1,
            WeaveType::Mixed => 2,
        };
        counts[index] += 1;
    }
    let best = counts.iter().copied().max().unwrap_or(0);
    if counts[0] == best {
        WeaveType::Solid
    } else if counts[1] == best {
        WeaveType::Textured
    } else {
        WeaveType::Mixed
    }
}

fn text_density(character_count: usize) -> TextDensity {
    match character_count {
        0 => TextDensity::None,
        1..=5 => TextDensity::Sparse,
        6..=15 => TextDensity::Moderate,
        16..=30 => TextDensity::Dense,
        _ => TextDensity::Packed,
    }
}

fn text_row_rarity(rows: usize) -> RarityTier {
    match rows {
        0 => RarityTier::Common,
        1 => RarityTier::Uncommon,
        2 => RarityTier::Rare,
        3 => RarityTier::Epic,
        _ => RarityTier::Legendary,
    }
}

fn character_rarity(characters: usize) -> RarityTier {
    match characters {
        0 => RarityTier::Common,
        1..=5 => RarityTier::Uncommon,
        6..=15 => RarityTier::Rare,
        16..=30 => RarityTier::Epic,
        _ => RarityTier::Legendary,
    }
}

fn stripe_count_rarity(count: usize) -> RarityTier {
    if count < 20 {
        RarityTier::Legendary
    } else if count < 25 {
        RarityTier::Epic
    } else if count < 32 {
        RarityTier::Rare
    } else if count < 40 {
        RarityTier::Uncommon
    } else {
        RarityTier::Common
    }
}

/// Ink colors for woven text, derived once per artifact from the palette's
/// lightest and darkest colors by mean luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkColors {
    /// Used over dark backgrounds.
    pub light: Rgb,
    /// Used over light backgrounds.
    pub dark: Rgb,
}

impl InkColors {
    /// Scan the palette once, tracking the running min and max luminance,
    /// then push both extremes further apart for contrast.
    pub fn from_palette(palette: &Palette) -> Self {
        let mut darkest = Rgb::black();
        let mut lightest = Rgb::black();
        let mut darkest_lum = f64::INFINITY;
        let mut lightest_lum = f64::NEG_INFINITY;

        for hex in &palette.colors {
            let color: Rgb = (*hex).into();
            let lum = color.mean_luminance();
            if lum < darkest_lum {
                darkest_lum = lum;
                darkest = color;
            }
            if lum > lightest_lum {
                lightest_lum = lum;
                lightest = color;
            }
        }

        Self {
            light: lightest.lerp(&Rgb::white(), 0.3),
            dark: darkest.lerp(&Rgb::black(), 0.4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use crate::stripes::generate_stripe_layout;
    use loomgen_spec::{HexColor, PaletteTable};

    fn fixture() -> (Palette, StripeLayout) {
        let palette = PaletteTable::builtin()
            .get("Jamakalam")
            .unwrap()
            .clone();
        let layout =
            generate_stripe_layout(&mut SeededRng::new(42), 1200.0, &palette).unwrap();
        (palette, layout)
    }

    #[test]
    fn traits_are_idempotent() {
        let (palette, layout) = fixture();
        let rows = vec!["WELCOME".to_string()];
        let thresholds = ComplexityThresholds::default();
        let a = compute_traits(&palette, &layout, &TextLayout::default(), &rows, 3, &thresholds);
        let b = compute_traits(&palette, &layout, &TextLayout::default(), &rows, 3, &thresholds);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_counts_are_zero() {
        let (palette, layout) = fixture();
        let traits = compute_traits(
            &palette,
            &layout,
            &TextLayout::default(),
            &[],
            2,
            &ComplexityThresholds::default(),
        );
        assert_eq!(traits.character_count, 0);
        assert_eq!(traits.text_row_count, 0);
        assert_eq!(traits.text_density, TextDensity::None);
        assert_eq!(traits.text_row_rarity, RarityTier::Common);
    }

    #[test]
    fn spaces_are_not_characters() {
        let (palette, layout) = fixture();
        let rows = vec!["A B".to_string(), String::new()];
        let traits = compute_traits(
            &palette,
            &layout,
            &TextLayout::default(),
            &rows,
            2,
            &ComplexityThresholds::default(),
        );
        assert_eq!(traits.character_count, 2);
        assert_eq!(traits.text_row_count, 1);
        assert_eq!(traits.text_density, TextDensity::Sparse);
    }

    #[test]
    fn color_variety_counts_distinct_colors() {
        let (palette, layout) = fixture();
        let traits = compute_traits(
            &palette,
            &layout,
            &TextLayout::default(),
            &[],
            2,
            &ComplexityThresholds::default(),
        );
        assert!(traits.color_variety >= 1);
        assert!(traits.color_variety <= palette.colors.len());
    }

    #[test]
    fn dominant_weave_tie_breaks_by_declaration_order() {
        // All solid layout votes Solid; the tie-break path prefers Solid
        // over Textured over Mixed when counts are equal.
        let (_, layout) = fixture();
        let weave = dominant_weave(&layout);
        let mut counts = [0usize; 3];
        for stripe in layout.iter() {
            counts[match stripe.weave {
                WeaveType::Solid => 0,
                WeaveType::Textured => 1,
                WeaveType::Mixed => 2,
            }] += 1;
        }
        let best = *counts.iter().max().unwrap();
        let expected = if counts[0] == best {
            WeaveType::Solid
        } else if counts[1] == best {
            WeaveType::Textured
        } else {
            WeaveType::Mixed
        };
        assert_eq!(weave, expected);
    }

    #[test]
    fn ink_colors_come_from_luminance_extremes() {
        let palette = Palette {
            name: "Two Tone".into(),
            colors: vec![HexColor([10, 10, 10]), HexColor([240, 240, 240])],
            rarity: RarityTier::Common,
        };
        let ink = InkColors::from_palette(&palette);
        // Dark ink is the darkest color pushed 40% toward black.
        assert!((ink.dark.r - 6.0).abs() < 1e-9);
        // Light ink is the lightest color pushed 30% toward white.
        assert!((ink.light.r - (240.0 + (255.0 - 240.0) * 0.3)).abs() < 1e-9);
    }

    #[test]
    fn complexity_buckets() {
        let t = ComplexityThresholds::default();
        assert_eq!(t.bucket(0), Complexity::Simple);
        assert_eq!(t.bucket(19), Complexity::Simple);
        assert_eq!(t.bucket(20), Complexity::Moderate);
        assert_eq!(t.bucket(34), Complexity::Moderate);
        assert_eq!(t.bucket(35), Complexity::Complex);
        assert_eq!(t.bucket(50), Complexity::VeryComplex);
    }

    #[test]
    fn trait_set_serializes_camel_case() {
        let (palette, layout) = fixture();
        let traits = compute_traits(
            &palette,
            &layout,
            &TextLayout::default(),
            &[],
            4,
            &ComplexityThresholds::default(),
        );
        let json = serde_json::to_value(&traits).unwrap();
        assert!(json.get("stripeCount").is_some());
        assert!(json.get("paletteRarityTier").is_some());
        assert!(json.get("warpThickness").is_some());
    }
}
