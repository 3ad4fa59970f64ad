//! Canvas surface abstraction and drawing-command recording.
//!
//! The pipeline never writes pixels. It emits exactly three primitives to a
//! [`CanvasSurface`], in a single pass, in a fixed order; any backend that
//! implements the three primitives identically reproduces the artifact.
//! [`CommandRecorder`] captures the stream as serializable commands so it can
//! be hashed, diffed, or replayed against a concrete rasterizer.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A point in artifact coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The only primitives the generation core may emit.
pub trait CanvasSurface {
    /// Fill the whole surface with one color.
    fn clear_background(&mut self, color: Rgb);

    /// Fill an axis-aligned rectangle. `alpha` is in [0, 1]; opaque is 1.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb, alpha: f64);

    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Point], color: Rgb, width: f64);
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearBackground {
        color: Rgb,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
        alpha: f64,
    },
    StrokePolyline {
        points: Vec<Point>,
        color: Rgb,
        width: f64,
    },
}

/// A surface that records the command stream instead of rasterizing it.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded stream, in emission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Canonical BLAKE3 hash of the recorded stream.
    pub fn stream_hash(&self) -> Result<String, serde_json::Error> {
        loomgen_spec::hash::canonical_hash(&self.commands)
    }

    /// Replay the recorded stream onto another surface.
    pub fn replay(&self, surface: &mut dyn CanvasSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::ClearBackground { color } => surface.clear_background(*color),
                DrawCommand::FillRect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    alpha,
                } => surface.fill_rect(*x, *y, *w, *h, *color, *alpha),
                DrawCommand::StrokePolyline {
                    points,
                    color,
                    width,
                } => surface.stroke_polyline(points, *color, *width),
            }
        }
    }
}

impl CanvasSurface for CommandRecorder {
    fn clear_background(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::ClearBackground { color });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb, alpha: f64) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color,
            alpha,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Rgb, width: f64) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            width,
        });
    }
}
