//! Raster backend for the canvas contract.
//!
//! `RasterSurface` rasterizes the drawing stream into an RGB framebuffer and
//! writes it out as a PNG with fixed encoder settings, so the same command
//! stream always yields byte-identical files.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::color::Rgb;
use crate::surface::{CanvasSurface, Point};

/// Errors from rasterization and PNG export.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("png encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// An RGB framebuffer implementing [`CanvasSurface`].
///
/// The surface carries an origin offset so that geometry outside the core
/// artifact rectangle (the fringe bands at negative y and below the bottom
/// edge) still lands inside the pixel grid.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    origin_x: f64,
    origin_y: f64,
    pixels: Vec<Rgb>,
}

impl RasterSurface {
    /// A surface of `width` x `height` pixels with the artifact origin at
    /// the top-left pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin_x: 0.0,
            origin_y: 0.0,
            pixels: vec![Rgb::black(); (width as usize) * (height as usize)],
        }
    }

    /// A surface sized for an artifact plus its fringe margin: the pixel
    /// grid extends `margin` units above and below the artifact rectangle.
    pub fn for_artifact(width: f64, height: f64, margin: f64) -> Self {
        let mut surface = Self::new(
            width.ceil() as u32,
            (height + 2.0 * margin).ceil() as u32,
        );
        surface.origin_y = margin;
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, px: u32, py: u32) -> usize {
        (py as usize) * (self.width as usize) + px as usize
    }

    /// Alpha-over blend one pixel. No-op outside the buffer.
    fn blend(&mut self, px: i64, py: i64, color: Rgb, alpha: f64) {
        if px < 0 || py < 0 || px >= i64::from(self.width) || py >= i64::from(self.height) {
            return;
        }
        let i = self.index(px as u32, py as u32);
        let base = self.pixels[i];
        self.pixels[i] = Rgb::new(
            base.r + (color.r - base.r) * alpha,
            base.g + (color.g - base.g) * alpha,
            base.b + (color.b - base.b) * alpha,
        );
    }

    /// Pixel data as packed RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            data.extend_from_slice(&pixel.to_rgb8());
        }
        data
    }

    /// Encode the framebuffer as PNG bytes.
    ///
    /// Compression and filter settings are fixed; there is no variable
    /// metadata, so equal framebuffers encode to equal bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut data = Vec::new();
        self.encode_png_to_writer(&mut data)?;
        Ok(data)
    }

    fn encode_png_to_writer<W: Write>(&self, writer: W) -> Result<(), RasterError> {
        let mut encoder = Encoder::new(writer, self.width, self.height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(Compression::Default);
        encoder.set_filter(FilterType::NoFilter);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.to_rgb8())?;
        Ok(())
    }

    /// Encode and write the framebuffer to a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), RasterError> {
        let file = std::fs::File::create(path)?;
        self.encode_png_to_writer(std::io::BufWriter::new(file))
    }
}

/// BLAKE3 hash of encoded PNG bytes.
pub fn png_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

impl CanvasSurface for RasterSurface {
    fn clear_background(&mut self, color: Rgb) {
        for pixel in &mut self.pixels {
            *pixel = color;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb, alpha: f64) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let x0 = (x + self.origin_x).floor() as i64;
        let y0 = (y + self.origin_y).floor() as i64;
        let x1 = (x + self.origin_x + w).ceil() as i64;
        let y1 = (y + self.origin_y + h).ceil() as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, alpha);
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Rgb, width: f64) {
        if points.len() < 2 {
            return;
        }
        // Stamp a square brush along each segment at half-pixel steps.
        let radius = (width / 2.0).max(0.5);
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let steps = ((dx.hypot(dy) * 2.0).ceil() as usize).max(1);
            for step in 0..=steps {
                let t = step as f64 / steps as f64;
                let cx = a.x + dx * t + self.origin_x;
                let cy = a.y + dy * t + self.origin_y;
                let x0 = (cx - radius).floor() as i64;
                let y0 = (cy - radius).floor() as i64;
                let x1 = (cx + radius).ceil() as i64;
                let y1 = (cy + radius).ceil() as i64;
                for py in y0..y1 {
                    for px in x0..x1 {
                        self.blend(px, py, color, 1.0);
                    }
                }
            }
        }
    }
}
