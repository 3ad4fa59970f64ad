//! Text-to-pixel-block layout.
//!
//! Characters are laid out for an artifact that is rotated 90 degrees at
//! final presentation: glyph bitmaps go through a row/col swap with one axis
//! mirrored (`new_col = row`, `new_row = cols - 1 - col`), rows of text stack
//! horizontally, and the characters of a row stack bottom-to-top. The
//! transform must not be "simplified"; without it, glyphs render mirrored
//! once the presentation rotation is applied.

use loomgen_spec::{GlyphTable, SpecError, MAX_ROW_CHARS, GLYPH_COLS, GLYPH_ROWS};
use serde::{Deserialize, Serialize};

use crate::generate::GenerateError;

/// One inked glyph cell, translated into artifact coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextPixelBlock {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "w")]
    pub width: f64,
    #[serde(rename = "h")]
    pub height: f64,
}

impl TextPixelBlock {
    /// Whether a point falls inside this block (half-open on both axes).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// The full set of text blocks for one artifact. Membership-test oriented.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextLayout {
    blocks: Vec<TextPixelBlock>,
}

impl TextLayout {
    pub fn blocks(&self) -> &[TextPixelBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Linear-scan membership test. Correctness over asymptotics: block
    /// counts are small (hundreds at most).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.blocks.iter().any(|b| b.contains(x, y))
    }
}

/// Geometry inputs for text layout, all in artifact units.
#[derive(Debug, Clone, Copy)]
pub struct TextGeometry {
    pub artifact_width: f64,
    pub artifact_height: f64,
    pub warp_thickness: f64,
    pub weft_thickness: f64,
    pub text_scale: f64,
}

impl TextGeometry {
    /// Scaled cell width (one glyph cell along the x axis).
    fn cell_width(&self) -> f64 {
        (self.warp_thickness + 1.0) * self.text_scale
    }

    /// Scaled cell height (one glyph cell along the y axis).
    fn cell_height(&self) -> f64 {
        (self.weft_thickness + 1.0) * self.text_scale
    }
}

/// Convert text rows into pixel blocks.
///
/// Empty rows contribute no blocks and consume no layout space. An empty
/// row list yields an empty layout; a row longer than the character limit
/// fails.
pub fn generate_text_layout(
    rows: &[String],
    glyphs: &GlyphTable,
    geometry: &TextGeometry,
) -> Result<TextLayout, GenerateError> {
    for (row, text) in rows.iter().enumerate() {
        let len = text.chars().count();
        if len > MAX_ROW_CHARS {
            return Err(GenerateError::InvalidText(SpecError::RowTooLong {
                row,
                len,
            }));
        }
    }

    let rows: Vec<&String> = rows.iter().filter(|r| !r.is_empty()).collect();
    if rows.is_empty() {
        return Ok(TextLayout::default());
    }

    let cell_w = geometry.cell_width();
    let cell_h = geometry.cell_height();

    // After the presentation rotation, glyph rows run along x and glyph
    // columns along y.
    let char_width = GLYPH_ROWS as f64 * cell_w;
    let char_height = GLYPH_COLS as f64 * cell_h;
    let char_gap = cell_h;
    let row_gap = char_width * 1.5;

    let total_rows_width =
        rows.len() as f64 * char_width + (rows.len() as f64 - 1.0) * row_gap;
    let base_start_x = (geometry.artifact_width - total_rows_width) / 2.0;

    let mut blocks = Vec::new();
    for (row_index, text) in rows.iter().enumerate() {
        let char_count = text.chars().count() as f64;
        let text_height = char_count * (char_height + char_gap) - char_gap;

        let start_x = base_start_x + row_index as f64 * (char_width + row_gap);
        let start_y = (geometry.artifact_height - text_height) / 2.0;

        // Characters stack bottom-to-top so the row reads top-down after
        // rotation.
        for (i, ch) in text.chars().enumerate() {
            let char_y =
                start_y + (char_count - 1.0 - i as f64) * (char_height + char_gap);
            let glyph = glyphs.get(ch);

            for row in 0..GLYPH_ROWS {
                for col in 0..GLYPH_COLS {
                    if !glyph.is_inked(row, col) {
                        continue;
                    }
                    let new_col = row;
                    let new_row = GLYPH_COLS - 1 - col;
                    blocks.push(TextPixelBlock {
                        x: start_x + new_col as f64 * cell_w,
                        y: char_y + new_row as f64 * cell_h,
                        width: cell_w,
                        height: cell_h,
                    });
                }
            }
        }
    }

    Ok(TextLayout { blocks })
}
