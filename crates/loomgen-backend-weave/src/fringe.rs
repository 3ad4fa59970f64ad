//! Decorative fringe threads along the artifact's top and bottom edges.

use loomgen_spec::Palette;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::rng::SeededRng;
use crate::surface::{CanvasSurface, Point};

/// Threads per strand.
const THREADS_PER_STRAND: usize = 12;

/// Edge width covered by one strand.
const STRAND_SPAN: f64 = 12.0;

/// Polyline samples per thread (t from 0 to 1 in steps of 0.1).
const THREAD_SAMPLES: usize = 11;

/// Which artifact edge the fringe hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FringeEdge {
    Top,
    Bottom,
}

/// Emit one edge's fringe strands.
///
/// `x` and `y` position the fringe band's top-left corner; `width` is the
/// artifact width and `length` the fringe drop. Per-thread draw order
/// (offset, amplitude, frequency, direction, curl, length, stroke width,
/// then the per-sample jitters) is part of the artifact contract.
pub fn render_fringe(
    rng: &mut SeededRng,
    edge: FringeEdge,
    x: f64,
    y: f64,
    width: f64,
    length: f64,
    palette: &Palette,
    surface: &mut dyn CanvasSurface,
) {
    let strand_count = (width / STRAND_SPAN) as usize;
    if strand_count == 0 {
        return;
    }
    let strand_width = width / strand_count as f64;

    let (start_y, end_y) = match edge {
        FringeEdge::Top => (y + length, y),
        FringeEdge::Bottom => (y, y + length),
    };

    for strand in 0..strand_count {
        let strand_x = x + strand as f64 * strand_width;
        let strand_color: Rgb = (*rng.pick(&palette.colors)).into();
        // Fringe threads use a darkened version of the strand color.
        let thread_color = strand_color.scale(0.7);

        for _ in 0..THREADS_PER_STRAND {
            let thread_x = strand_x + rng.range(-strand_width / 6.0, strand_width / 6.0);
            let wave_amplitude = rng.range(1.0, 4.0);
            let wave_frequency = rng.range(0.2, 0.8);
            let direction = *rng.pick(&[-1.0, 1.0]);
            let curl_intensity = rng.range(0.5, 2.0);
            let thread_length = rng.range(0.8, 1.2);
            let stroke_width = rng.range(0.5, 1.2);

            let mut points = Vec::with_capacity(THREAD_SAMPLES);
            for step in 0..THREAD_SAMPLES {
                let t = step as f64 * 0.1;
                let y_pos = start_y + (end_y - start_y) * (t * thread_length);
                let mut x_offset = (t * std::f64::consts::PI * wave_frequency).sin()
                    * wave_amplitude
                    * t
                    * direction
                    * curl_intensity;
                x_offset += rng.range(-1.0, 1.0);
                // Occasional kinks.
                if rng.chance(0.3) {
                    x_offset += rng.range(-2.0, 2.0);
                }
                points.push(Point::new(thread_x + x_offset, y_pos));
            }

            surface.stroke_polyline(&points, thread_color, stroke_width);
        }
    }
}
