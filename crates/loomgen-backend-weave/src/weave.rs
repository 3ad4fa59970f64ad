//! Per-cell weave rendering.
//!
//! Walks a regular grid over each stripe and emits one filled rectangle per
//! cell. Per-cell draw order is part of the artifact contract: the three
//! jitter deltas are consumed in r, g, b order, every cell, text or not.

use crate::color::Rgb;
use crate::noise::WeaveNoise;
use crate::rng::SeededRng;
use crate::stripes::{StripeLayout, WeaveType};
use crate::surface::CanvasSurface;
use crate::text::TextLayout;
use crate::traits::InkColors;

/// Alpha of the contrast underlay painted beneath each text cell.
const TEXT_UNDERLAY_ALPHA: f64 = 0.5;

/// Opacity of the interlacing shadow rectangles.
const SHADOW_ALPHA: f64 = 40.0 / 255.0;

/// Opacity of the interlacing highlight rectangles.
const HIGHLIGHT_ALPHA: f64 = 30.0 / 255.0;

/// Grid geometry for the weave pass.
#[derive(Debug, Clone, Copy)]
pub struct WeaveGeometry {
    pub artifact_width: f64,
    pub warp_thickness: f64,
    pub weft_thickness: f64,
}

impl WeaveGeometry {
    #[inline]
    fn warp_spacing(&self) -> f64 {
        self.warp_thickness + 1.0
    }

    #[inline]
    fn weft_spacing(&self) -> f64 {
        self.weft_thickness + 1.0
    }
}

/// Render every stripe of the layout onto the surface.
pub fn render_weave(
    rng: &mut SeededRng,
    noise: &WeaveNoise,
    layout: &StripeLayout,
    text: &TextLayout,
    ink: &InkColors,
    geometry: &WeaveGeometry,
    surface: &mut dyn CanvasSurface,
) {
    for stripe in layout.iter() {
        let stripe_end = stripe.y_offset + stripe.height;
        let warp_spacing = geometry.warp_spacing();
        let weft_spacing = geometry.weft_spacing();
        let primary: Rgb = stripe.primary.into();

        // Thread pass: one cell per (x, y) grid position.
        let mut x = 0.0;
        while x < geometry.artifact_width {
            let mut y = stripe.y_offset;
            while y < stripe_end {
                let mut base = primary;
                match stripe.weave {
                    WeaveType::Mixed => {
                        if let Some(secondary) = stripe.secondary {
                            if noise.sample(x * 0.1, y * 0.1) > 0.5 {
                                base = secondary.into();
                            }
                        }
                    }
                    WeaveType::Textured => {
                        let n = noise.sample(x * 0.05, y * 0.05);
                        base = primary.lerp(&Rgb::white(), n * 0.15);
                    }
                    WeaveType::Solid => {}
                }

                let is_text = text.contains_point(x, y);

                // Jitter draws in r, g, b order.
                let r = base.r + rng.range(-15.0, 15.0);
                let g = base.g + rng.range(-15.0, 15.0);
                let b = base.b + rng.range(-15.0, 15.0);
                let mut cell = Rgb::new(r, g, b);

                if is_text {
                    // Pre-clamp luminance decides the ink shade.
                    let background = cell.mean_luminance();
                    cell = if background < 128.0 {
                        ink.light
                    } else {
                        ink.dark
                    };
                    // Contrast underlay, one unit larger in each direction,
                    // before the ink cell.
                    surface.fill_rect(
                        x - 1.0,
                        y - 1.0,
                        geometry.warp_thickness + 2.0,
                        weft_spacing + 2.0,
                        Rgb::black(),
                        TEXT_UNDERLAY_ALPHA,
                    );
                }

                let cell = cell.clamp();
                let warp_curve = (y * 0.05).sin() * 0.5;
                surface.fill_rect(
                    x + warp_curve,
                    y,
                    geometry.warp_thickness,
                    weft_spacing,
                    cell,
                    1.0,
                );

                y += weft_spacing;
            }
            x += warp_spacing;
        }

        // Interlacing relief: shadow cells where threads pass under,
        // highlights where they pass over. No randomness in either pass.
        let mut y = stripe.y_offset;
        while y < stripe_end {
            let mut x = 0.0;
            while x < geometry.artifact_width {
                surface.fill_rect(
                    x + 1.0,
                    y + 1.0,
                    warp_spacing - 2.0,
                    weft_spacing - 2.0,
                    Rgb::black(),
                    SHADOW_ALPHA,
                );
                x += warp_spacing * 2.0;
            }
            y += weft_spacing * 2.0;
        }

        let mut y = stripe.y_offset + weft_spacing;
        while y < stripe_end {
            let mut x = warp_spacing;
            while x < geometry.artifact_width {
                surface.fill_rect(
                    x,
                    y,
                    warp_spacing - 1.0,
                    weft_spacing - 1.0,
                    Rgb::white(),
                    HIGHLIGHT_ALPHA,
                );
                x += warp_spacing * 2.0;
            }
            y += weft_spacing * 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stripes::generate_stripe_layout;
    use crate::surface::{CommandRecorder, DrawCommand};
    use crate::text::{generate_text_layout, TextGeometry};
    use crate::traits::InkColors;
    use loomgen_spec::{GlyphTable, PaletteTable};

    fn fixture(
        seed: u64,
        rows: &[&str],
    ) -> (CommandRecorder, usize) {
        let table = PaletteTable::builtin();
        let palette = table.get("Classic Red & Black").unwrap();
        let mut rng = SeededRng::new(seed);
        let layout = generate_stripe_layout(&mut rng, 240.0, palette).unwrap();
        let rows: Vec<String> = rows.iter().map(|s| s.to_string()).collect();
        let text = generate_text_layout(
            &rows,
            &GlyphTable::builtin(),
            &TextGeometry {
                artifact_width: 160.0,
                artifact_height: 240.0,
                warp_thickness: 2.0,
                weft_thickness: 8.0,
                text_scale: 1.0,
            },
        )
        .unwrap();
        let ink = InkColors::from_palette(palette);
        let noise = WeaveNoise::new(seed);
        let mut recorder = CommandRecorder::new();
        render_weave(
            &mut rng,
            &noise,
            &layout,
            &text,
            &ink,
            &WeaveGeometry {
                artifact_width: 160.0,
                warp_thickness: 2.0,
                weft_thickness: 8.0,
            },
            &mut recorder,
        );
        let text_blocks = text.len();
        (recorder, text_blocks)
    }

    #[test]
    fn rendering_is_deterministic() {
        let (a, _) = fixture(42, &["HI"]);
        let (b, _) = fixture(42, &["HI"]);
        assert_eq!(a.commands(), b.commands());
    }

    #[test]
    fn emits_only_fill_rects() {
        let (recorder, _) = fixture(7, &[]);
        assert!(!recorder.commands().is_empty());
        assert!(recorder
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::FillRect { .. })));
    }

    #[test]
    fn text_cells_get_an_underlay() {
        let (with_text, blocks) = fixture(42, &["HI"]);
        assert!(blocks > 0);
        let underlays = with_text
            .commands()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::FillRect { alpha, color, .. }
                        if *alpha == TEXT_UNDERLAY_ALPHA && *color == Rgb::black()
                )
            })
            .count();
        assert!(underlays > 0, "no underlay rectangles emitted");
    }

    #[test]
    fn cell_colors_are_clamped() {
        let (recorder, _) = fixture(3, &["HI"]);
        for command in recorder.commands() {
            if let DrawCommand::FillRect { color, .. } = command {
                assert!((0.0..=255.0).contains(&color.r));
                assert!((0.0..=255.0).contains(&color.g));
                assert!((0.0..=255.0).contains(&color.b));
            }
        }
    }

    #[test]
    fn warp_curve_offsets_x() {
        // Cells at y where sin(y * 0.05) != 0 must be offset from the grid.
        let (recorder, _) = fixture(5, &[]);
        let off_grid = recorder.commands().iter().any(|c| {
            matches!(c, DrawCommand::FillRect { x, alpha, .. }
                if *alpha == 1.0 && (x - x.round()).abs() > 1e-9)
        });
        assert!(off_grid);
    }
}
