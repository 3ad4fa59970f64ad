//! Bitmap glyph table for woven text.
//!
//! Glyphs are fixed 5x7 bitmaps keyed by character. The input character set
//! is uppercase alphanumeric plus space; any character missing from the table
//! falls back to the space glyph (all blank), never an error.

/// Glyph bitmap width in cells.
pub const GLYPH_COLS: usize = 5;

/// Glyph bitmap height in cells.
pub const GLYPH_ROWS: usize = 7;

/// One character's bitmap. Row 0 is the top of the upright glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// One 5-bit mask per row, most significant bit = leftmost column.
    rows: [u8; GLYPH_ROWS],
}

impl Glyph {
    /// Whether the cell at (row, col) is inked.
    #[inline]
    pub fn is_inked(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < GLYPH_ROWS && col < GLYPH_COLS);
        self.rows[row] & (1 << (GLYPH_COLS - 1 - col)) != 0
    }

    /// Total inked cell count.
    pub fn ink_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    fn from_pattern(pattern: &[&str; GLYPH_ROWS]) -> Self {
        let mut rows = [0u8; GLYPH_ROWS];
        for (i, line) in pattern.iter().enumerate() {
            debug_assert_eq!(line.len(), GLYPH_COLS);
            for (j, ch) in line.bytes().enumerate() {
                if ch == b'1' {
                    rows[i] |= 1 << (GLYPH_COLS - 1 - j);
                }
            }
        }
        Self { rows }
    }
}

/// Read-only mapping from character to glyph.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    entries: Vec<(char, Glyph)>,
    space: Glyph,
}

impl GlyphTable {
    /// The built-in 5x7 font covering A-Z, 0-9, and space.
    pub fn builtin() -> Self {
        let entries: Vec<(char, Glyph)> = BUILTIN_GLYPHS
            .iter()
            .map(|(ch, pattern)| (*ch, Glyph::from_pattern(pattern)))
            .collect();
        let space = entries
            .iter()
            .find(|(ch, _)| *ch == ' ')
            .map(|(_, g)| *g)
            .expect("built-in glyph table defines the space glyph");
        Self { entries, space }
    }

    /// Look up a glyph, falling back to the space glyph when absent.
    pub fn get(&self, ch: char) -> &Glyph {
        self.entries
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, g)| g)
            .unwrap_or(&self.space)
    }

    /// The universal fallback glyph (all blank).
    pub fn space(&self) -> &Glyph {
        &self.space
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[rustfmt::skip]
const BUILTIN_GLYPHS: &[(char, [&str; GLYPH_ROWS])] = &[
    ('A', ["01110", "10001", "10001", "11111", "10001", "10001", "10001"]),
    ('B', ["11110", "10001", "10001", "11110", "10001", "10001", "11110"]),
    ('C', ["01111", "10000", "10000", "10000", "10000", "10000", "01111"]),
    ('D', ["11110", "10001", "10001", "10001", "10001", "10001", "11110"]),
    ('E', ["11111", "10000", "10000", "11110", "10000", "10000", "11111"]),
    ('F', ["11111", "10000", "10000", "11110", "10000", "10000", "10000"]),
    ('G', ["01111", "10000", "10000", "10011", "10001", "10001", "01111"]),
    ('H', ["10001", "10001", "10001", "11111", "10001", "10001", "10001"]),
    ('I', ["11111", "00100", "00100", "00100", "00100", "00100", "11111"]),
    ('J', ["11111", "00001", "00001", "00001", "00001", "10001", "01110"]),
    ('K', ["10001", "10010", "10100", "11000", "10100", "10010", "10001"]),
    ('L', ["10000", "10000", "10000", "10000", "10000", "10000", "11111"]),
    ('M', ["10001", "11011", "10101", "10001", "10001", "10001", "10001"]),
    ('N', ["10001", "11001", "10101", "10011", "10001", "10001", "10001"]),
    ('O', ["01110", "10001", "10001", "10001", "10001", "10001", "01110"]),
    ('P', ["11110", "10001", "10001", "11110", "10000", "10000", "10000"]),
    ('Q', ["01110", "10001", "10001", "10001", "10101", "10010", "01101"]),
    ('R', ["11110", "10001", "10001", "11110", "10100", "10010", "10001"]),
    ('S', ["01111", "10000", "10000", "01110", "00001", "00001", "11110"]),
    ('T', ["11111", "00100", "00100", "00100", "00100", "00100", "00100"]),
    ('U', ["10001", "10001", "10001", "10001", "10001", "10001", "01110"]),
    ('V', ["10001", "10001", "10001", "10001", "10001", "01010", "00100"]),
    ('W', ["10001", "10001", "10001", "10001", "10101", "11011", "10001"]),
    ('X', ["10001", "10001", "01010", "00100", "01010", "10001", "10001"]),
    ('Y', ["10001", "10001", "01010", "00100", "00100", "00100", "00100"]),
    ('Z', ["11111", "00001", "00010", "00100", "01000", "10000", "11111"]),
    (' ', ["00000", "00000", "00000", "00000", "00000", "00000", "00000"]),
    ('0', ["01110", "10001", "10011", "10101", "11001", "10001", "01110"]),
    ('1', ["00100", "01100", "00100", "00100", "00100", "00100", "01110"]),
    ('2', ["01110", "10001", "00001", "00010", "00100", "01000", "11111"]),
    ('3', ["11110", "00001", "00001", "01110", "00001", "00001", "11110"]),
    ('4', ["00010", "00110", "01010", "10010", "11111", "00010", "00010"]),
    ('5', ["11111", "10000", "10000", "11110", "00001", "00001", "11110"]),
    ('6', ["01110", "10000", "10000", "11110", "10001", "10001", "01110"]),
    ('7', ["11111", "00001", "00010", "00100", "01000", "01000", "01000"]),
    ('8', ["01110", "10001", "10001", "01110", "10001", "10001", "01110"]),
    ('9', ["01110", "10001", "10001", "01111", "00001", "00001", "01110"]),
];
