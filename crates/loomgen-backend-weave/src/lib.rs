//! Loomgen Weave Generation Backend
//!
//! This crate turns a seed (plus optional palette name and text rows) into a
//! woven textile artwork. All output is byte-identical given the same
//! request: the seeded stream, the stripe and text layouts, the emitted
//! drawing commands, and the PNG bytes.
//!
//! # Example
//!
//! ```no_run
//! use loomgen_backend_weave::generate::{generate, ArtifactConfig};
//! use loomgen_backend_weave::raster::RasterSurface;
//! use loomgen_spec::{ArtifactRequest, GlyphTable, PaletteTable};
//! use std::path::Path;
//!
//! let request = ArtifactRequest::builder(42).text_row("WELCOME").build();
//! let config = ArtifactConfig::default();
//! let mut surface = RasterSurface::for_artifact(config.width, config.height, config.fringe_length);
//!
//! let artifact = generate(
//!     &request,
//!     &PaletteTable::builtin(),
//!     &GlyphTable::builtin(),
//!     &config,
//!     &mut surface,
//! )
//! .unwrap();
//!
//! surface.write_png(Path::new("rug-42.png")).unwrap();
//! println!("{} ({})", artifact.traits.palette_name, artifact.hash().unwrap());
//! ```
//!
//! # Determinism
//!
//! - Same request = identical artifact, command stream, and PNG bytes
//! - A single xorshift64* stream drives every random decision, in a fixed
//!   draw order; Perlin noise runs off its own table built once per seed
//! - PNG encoding uses fixed compression settings

pub mod color;
pub mod fringe;
pub mod generate;
pub mod noise;
pub mod raster;
pub mod rng;
pub mod select;
pub mod stripes;
pub mod surface;
pub mod text;
pub mod traits;
pub mod weave;

// Re-export main types for convenience
pub use color::Rgb;
pub use fringe::FringeEdge;
pub use generate::{generate, Artifact, ArtifactConfig, GenerateError};
pub use noise::WeaveNoise;
pub use raster::{RasterSurface, RasterError};
pub use rng::SeededRng;
pub use select::{resolve_palette, select_palette};
pub use stripes::{generate_stripe_layout, Stripe, StripeLayout, WeaveType};
pub use surface::{CanvasSurface, CommandRecorder, DrawCommand, Point};
pub use text::{generate_text_layout, TextGeometry, TextLayout, TextPixelBlock};
pub use traits::{compute_traits, Complexity, ComplexityThresholds, InkColors, TextDensity, TraitSet};
