//! Artifact generation entry point.
//!
//! One call runs the whole deterministic pipeline: seed the RNG, pick the
//! warp thickness, select the palette, synthesize the stripe layout and text
//! layout, emit the full drawing stream to the surface, and derive traits.
//! Draw order across stages is fixed; nothing in this module may reorder it.

use loomgen_spec::{ArtifactRequest, GlyphTable, Palette, PaletteTable, SpecError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::fringe::{render_fringe, FringeEdge};
use crate::noise::WeaveNoise;
use crate::rng::SeededRng;
use crate::select::{resolve_palette, select_palette};
use crate::stripes::{generate_stripe_layout, StripeLayout};
use crate::surface::CanvasSurface;
use crate::text::{generate_text_layout, TextGeometry, TextLayout};
use crate::traits::{compute_traits, ComplexityThresholds, InkColors, TraitSet};
use crate::weave::{render_weave, WeaveGeometry};

/// Warp thickness candidates; one is drawn per artifact as the first
/// consumption from the seeded stream.
const WARP_THICKNESS_OPTIONS: [u32; 6] = [1, 2, 3, 4, 5, 6];

/// Background fill emitted before any weave cell.
const BACKGROUND: Rgb = Rgb::new(222.0, 222.0, 222.0);

/// Errors from artifact generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// External palette/glyph table is unusable.
    #[error("configuration error: {0}")]
    Config(SpecError),

    /// Text input violates the row or character limits.
    #[error("invalid text: {0}")]
    InvalidText(SpecError),

    /// Non-positive artifact dimension.
    #[error("invalid artifact dimension: {0}")]
    InvalidDimension(f64),
}

impl GenerateError {
    /// Stable error code string for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::Config(_) => "W001",
            GenerateError::InvalidText(_) => "W002",
            GenerateError::InvalidDimension(_) => "W003",
        }
    }
}

/// Fixed artifact geometry and trait configuration.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub width: f64,
    pub height: f64,
    pub fringe_length: f64,
    pub weft_thickness: f64,
    pub text_scale: f64,
    pub complexity: ComplexityThresholds,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 1200.0,
            fringe_length: 30.0,
            weft_thickness: 8.0,
            text_scale: 2.0,
            complexity: ComplexityThresholds::default(),
        }
    }
}

/// Everything generated for one request, minus the drawing stream (which
/// goes to the surface as it is produced).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub seed: u64,
    pub palette: Palette,
    pub warp_thickness: u32,
    pub stripes: StripeLayout,
    pub text: TextLayout,
    pub traits: TraitSet,
}

impl Artifact {
    /// Canonical BLAKE3 hash of the serialized artifact.
    pub fn hash(&self) -> Result<String, serde_json::Error> {
        loomgen_spec::hash::canonical_hash(self)
    }
}

/// Run the full pipeline for one request.
///
/// Pure except for emission to `surface`: two calls with identical inputs
/// produce identical artifacts and identical command streams.
pub fn generate(
    request: &ArtifactRequest,
    palettes: &PaletteTable,
    glyphs: &GlyphTable,
    config: &ArtifactConfig,
    surface: &mut dyn CanvasSurface,
) -> Result<Artifact, GenerateError> {
    if config.width <= 0.0 {
        return Err(GenerateError::InvalidDimension(config.width));
    }
    if config.height <= 0.0 {
        return Err(GenerateError::InvalidDimension(config.height));
    }
    request.validate().map_err(GenerateError::InvalidText)?;

    let mut rng = SeededRng::new(request.seed);
    let noise = WeaveNoise::new(request.seed);

    // Draw order: warp thickness first, then palette selection (skipped
    // entirely when a palette is named), then stripes, then the render
    // stages.
    let warp_thickness = *rng.pick(&WARP_THICKNESS_OPTIONS);

    let palette = match &request.palette_name {
        Some(name) => resolve_palette(palettes, name).map_err(GenerateError::Config)?,
        None => select_palette(&mut rng, palettes).map_err(GenerateError::Config)?,
    };

    let stripes = generate_stripe_layout(&mut rng, config.height, palette)?;

    let text = generate_text_layout(
        &request.text_rows,
        glyphs,
        &TextGeometry {
            artifact_width: config.width,
            artifact_height: config.height,
            warp_thickness: warp_thickness as f64,
            weft_thickness: config.weft_thickness,
            text_scale: config.text_scale,
        },
    )?;

    let ink = InkColors::from_palette(palette);

    surface.clear_background(BACKGROUND);
    render_weave(
        &mut rng,
        &noise,
        &stripes,
        &text,
        &ink,
        &WeaveGeometry {
            artifact_width: config.width,
            warp_thickness: warp_thickness as f64,
            weft_thickness: config.weft_thickness,
        },
        surface,
    );

    render_fringe(
        &mut rng,
        FringeEdge::Top,
        0.0,
        -config.fringe_length,
        config.width,
        config.fringe_length,
        palette,
        surface,
    );
    render_fringe(
        &mut rng,
        FringeEdge::Bottom,
        0.0,
        config.height,
        config.width,
        config.fringe_length,
        palette,
        surface,
    );

    let traits = compute_traits(
        palette,
        &stripes,
        &text,
        &request.text_rows,
        warp_thickness,
        &config.complexity,
    );

    Ok(Artifact {
        seed: request.seed,
        palette: palette.clone(),
        warp_thickness,
        stripes,
        text,
        traits,
    })
}
