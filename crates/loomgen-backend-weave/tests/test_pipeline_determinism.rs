//! End-to-end determinism tests for the generation pipeline.
//!
//! These exercise the full contract: same request means identical artifact
//! metadata, identical drawing command streams, and byte-identical PNGs.

use loomgen_backend_weave::generate::{generate, ArtifactConfig};
use loomgen_backend_weave::raster::{png_hash, RasterSurface};
use loomgen_backend_weave::rng::SeededRng;
use loomgen_backend_weave::surface::CommandRecorder;
use loomgen_backend_weave::Artifact;
use loomgen_spec::{ArtifactRequest, GlyphTable, HexColor, Palette, PaletteTable, RarityTier};
use pretty_assertions::assert_eq;

fn run(request: &ArtifactRequest) -> (Artifact, CommandRecorder) {
    let mut recorder = CommandRecorder::new();
    let artifact = generate(
        request,
        &PaletteTable::builtin(),
        &GlyphTable::builtin(),
        &ArtifactConfig::default(),
        &mut recorder,
    )
    .unwrap();
    (artifact, recorder)
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_repeated_generation_is_byte_identical() {
    let request = ArtifactRequest::builder(42)
        .palette("Tamil Cultural")
        .text_row("WELCOME")
        .build();

    let (artifact_a, stream_a) = run(&request);
    let (artifact_b, stream_b) = run(&request);

    assert_eq!(artifact_a, artifact_b);
    assert_eq!(artifact_a.hash().unwrap(), artifact_b.hash().unwrap());
    assert_eq!(stream_a.commands(), stream_b.commands());
    assert_eq!(
        stream_a.stream_hash().unwrap(),
        stream_b.stream_hash().unwrap()
    );
}

#[test]
fn test_png_bytes_are_identical_across_runs() {
    let request = ArtifactRequest::builder(7).text_row("HOME").build();
    let config = ArtifactConfig::default();

    let mut hashes = Vec::new();
    for _ in 0..2 {
        let mut surface =
            RasterSurface::for_artifact(config.width, config.height, config.fringe_length);
        generate(
            &request,
            &PaletteTable::builtin(),
            &GlyphTable::builtin(),
            &config,
            &mut surface,
        )
        .unwrap();
        hashes.push(png_hash(&surface.encode_png().unwrap()));
    }
    assert_eq!(hashes[0], hashes[1]);
}

#[test]
fn test_different_seeds_diverge() {
    let (_, stream_a) = run(&ArtifactRequest::new(1));
    let (_, stream_b) = run(&ArtifactRequest::new(2));
    assert_ne!(
        stream_a.stream_hash().unwrap(),
        stream_b.stream_hash().unwrap()
    );
}

#[test]
fn test_replayed_stream_reproduces_the_png() {
    let request = ArtifactRequest::new(99);
    let config = ArtifactConfig::default();

    let mut recorder = CommandRecorder::new();
    generate(
        &request,
        &PaletteTable::builtin(),
        &GlyphTable::builtin(),
        &config,
        &mut recorder,
    )
    .unwrap();

    let mut direct =
        RasterSurface::for_artifact(config.width, config.height, config.fringe_length);
    generate(
        &request,
        &PaletteTable::builtin(),
        &GlyphTable::builtin(),
        &config,
        &mut direct,
    )
    .unwrap();

    let mut replayed =
        RasterSurface::for_artifact(config.width, config.height, config.fringe_length);
    recorder.replay(&mut replayed);

    assert_eq!(
        direct.encode_png().unwrap(),
        replayed.encode_png().unwrap()
    );
}

// ============================================================================
// Draw order and layout invariants
// ============================================================================

#[test]
fn test_warp_thickness_is_the_first_draw() {
    let options = [1u32, 2, 3, 4, 5, 6];
    for seed in 0..100 {
        let (artifact, _) = run(&ArtifactRequest::new(seed));
        let expected = *SeededRng::new(seed).pick(&options);
        assert_eq!(artifact.warp_thickness, expected, "seed {seed}");
    }
}

#[test]
fn test_stripe_layout_covers_the_height_exactly() {
    for seed in [0, 1, 42, 1000, u64::MAX] {
        let (artifact, _) = run(&ArtifactRequest::new(seed));
        assert_eq!(artifact.stripes.total_height(), 1200.0, "seed {seed}");
    }
}

#[test]
fn test_named_palette_skips_selection_draws() {
    // Two same-sized palettes under the same seed must yield the same stripe
    // geometry: with a palette named, no selection draws are consumed, so the
    // stream position entering stripe synthesis is identical.
    let geometry = |name: &str| {
        let request = ArtifactRequest::builder(5).palette(name).build();
        let (artifact, _) = run(&request);
        artifact
            .stripes
            .iter()
            .map(|s| (s.y_offset, s.height))
            .collect::<Vec<_>>()
    };

    let classic = PaletteTable::builtin()
        .get("Classic Red & Black")
        .map(|p| p.colors.len());
    let coastal = PaletteTable::builtin()
        .get("Coastal Blue & White")
        .map(|p| p.colors.len());
    assert_eq!(classic, coastal, "test premise: equal palette sizes");

    assert_eq!(
        geometry("Classic Red & Black"),
        geometry("Coastal Blue & White")
    );
}

// ============================================================================
// Palette selection scenarios
// ============================================================================

#[test]
fn test_empty_rarity_tier_falls_back_to_common() {
    // A table with no Legendary entries: every seed must still resolve to
    // some palette, never an error.
    let table = PaletteTable::from_palettes(vec![
        Palette {
            name: "Plain".to_string(),
            colors: vec![
                HexColor([200, 30, 30]),
                HexColor([30, 200, 30]),
                HexColor([30, 30, 200]),
            ],
            rarity: RarityTier::Common,
        },
        Palette {
            name: "Fancy".to_string(),
            colors: vec![HexColor([250, 250, 250]), HexColor([5, 5, 5])],
            rarity: RarityTier::Epic,
        },
    ]);

    for seed in 0..500 {
        let artifact = generate(
            &ArtifactRequest::new(seed),
            &table,
            &GlyphTable::builtin(),
            &ArtifactConfig::default(),
            &mut CommandRecorder::new(),
        )
        .unwrap();
        assert!(artifact.palette.name == "Plain" || artifact.palette.name == "Fancy");
    }
}

#[test]
fn test_tamil_cultural_scenario() {
    let request = ArtifactRequest::builder(42)
        .palette("Tamil Cultural")
        .text_row("WELCOME")
        .build();
    let (artifact, stream) = run(&request);

    assert_eq!(artifact.palette.name, "Tamil Cultural");
    assert_eq!(artifact.palette.rarity, RarityTier::Rare);
    assert_eq!(artifact.traits.palette_rarity_tier, RarityTier::Rare);
    assert_eq!(artifact.traits.character_count, 7);
    assert_eq!(artifact.traits.text_row_count, 1);
    assert!(!stream.commands().is_empty());
}

// ============================================================================
// Text handling
// ============================================================================

#[test]
fn test_empty_rows_consume_no_layout_space() {
    let with_blank = ArtifactRequest::builder(11)
        .text_row("")
        .text_row("HI")
        .build();
    let without_blank = ArtifactRequest::builder(11).text_row("HI").build();

    let (a, _) = run(&with_blank);
    let (b, _) = run(&without_blank);
    assert_eq!(a.text, b.text);
}

#[test]
fn test_no_text_yields_empty_layout() {
    let (artifact, _) = run(&ArtifactRequest::new(3));
    assert!(artifact.text.blocks().is_empty());
    assert_eq!(artifact.traits.character_count, 0);
}
