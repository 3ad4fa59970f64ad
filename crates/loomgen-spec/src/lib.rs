//! Loomgen contract types.
//!
//! This crate holds everything the generation backend consumes as read-only
//! input: the artifact request (seed, optional palette name, text rows), the
//! palette table with rarity tiers, the bitmap glyph table, validation, and
//! canonical hashing for reproducibility checks.
//!
//! # Example
//!
//! ```
//! use loomgen_spec::{ArtifactRequest, PaletteTable};
//!
//! let request = ArtifactRequest::builder(42)
//!     .palette("Tamil Cultural")
//!     .text_row("WELCOME")
//!     .build();
//! request.validate().unwrap();
//!
//! let table = PaletteTable::builtin();
//! assert!(table.get("Tamil Cultural").is_some());
//! ```

pub mod error;
pub mod glyph;
pub mod hash;
pub mod palette;
pub mod request;

pub use error::SpecError;
pub use glyph::{Glyph, GlyphTable, GLYPH_COLS, GLYPH_ROWS};
pub use palette::{HexColor, Palette, PaletteTable, RarityTier};
pub use request::{ArtifactRequest, MAX_ROW_CHARS, MAX_TEXT_ROWS};
