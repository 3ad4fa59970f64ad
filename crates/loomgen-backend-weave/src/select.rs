//! Rarity-weighted palette selection.

use loomgen_spec::{Palette, PaletteTable, RarityTier, SpecError};

use crate::rng::SeededRng;

/// Fixed tier weights out of 100, evaluated in this order.
///
/// A roll in [0,100) maps to the first band whose cumulative threshold
/// exceeds it: Legendary [0,4), Epic [4,12), Rare [12,23), Uncommon [23,48),
/// Common [48,100).
const TIER_BANDS: [(RarityTier, f64); 4] = [
    (RarityTier::Legendary, 4.0),
    (RarityTier::Epic, 12.0),
    (RarityTier::Rare, 23.0),
    (RarityTier::Uncommon, 48.0),
];

/// Pick a palette with a rarity-weighted draw.
///
/// Consumes one float for the tier roll and one for the in-tier pick. When
/// the rolled tier has no palettes, falls back to a uniform pick among
/// Common-tier entries (still one in-tier draw).
pub fn select_palette<'a>(
    rng: &mut SeededRng,
    table: &'a PaletteTable,
) -> Result<&'a Palette, SpecError> {
    table.validate()?;

    let roll = rng.range(0.0, 100.0);
    let tier = TIER_BANDS
        .iter()
        .find(|(_, threshold)| roll < *threshold)
        .map(|(tier, _)| *tier)
        .unwrap_or(RarityTier::Common);

    let mut candidates = table.by_tier(tier);
    if candidates.is_empty() {
        candidates = table.by_tier(RarityTier::Common);
    }
    // validate() guarantees the Common tier is populated.
    Ok(*rng.pick(&candidates))
}

/// Resolve an explicitly named palette, bypassing rarity selection.
///
/// Consumes no draws.
pub fn resolve_palette<'a>(
    table: &'a PaletteTable,
    name: &str,
) -> Result<&'a Palette, SpecError> {
    table
        .get(name)
        .ok_or_else(|| SpecError::UnknownPalette(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomgen_spec::HexColor;

    fn single_color_palette(name: &str, rarity: RarityTier) -> Palette {
        Palette {
            name: name.to_string(),
            colors: vec![HexColor([100, 100, 100])],
            rarity,
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let table = PaletteTable::builtin();
        let a = select_palette(&mut SeededRng::new(42), &table).unwrap();
        let b = select_palette(&mut SeededRng::new(42), &table).unwrap();
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn named_lookup_bypasses_selection() {
        let table = PaletteTable::builtin();
        let p = resolve_palette(&table, "Tamil Cultural").unwrap();
        assert_eq!(p.name, "Tamil Cultural");
        assert_eq!(
            resolve_palette(&table, "Missing"),
            Err(SpecError::UnknownPalette("Missing".to_string()))
        );
    }

    #[test]
    fn empty_table_is_a_config_error() {
        let table = PaletteTable::from_palettes(vec![]);
        assert_eq!(
            select_palette(&mut SeededRng::new(1), &table),
            Err(SpecError::EmptyPaletteTable)
        );
    }

    #[test]
    fn missing_common_tier_is_a_config_error() {
        let table =
            PaletteTable::from_palettes(vec![single_color_palette("Epic Only", RarityTier::Epic)]);
        assert_eq!(
            select_palette(&mut SeededRng::new(1), &table),
            Err(SpecError::NoCommonPalette)
        );
    }

    #[test]
    fn empty_tier_falls_back_to_common() {
        // Only Common palettes exist: every roll, whatever tier it lands in,
        // must resolve to a Common entry rather than fail.
        let table = PaletteTable::from_palettes(vec![
            single_color_palette("Common A", RarityTier::Common),
            single_color_palette("Common B", RarityTier::Common),
        ]);
        for seed in 0..500 {
            let p = select_palette(&mut SeededRng::new(seed), &table).unwrap();
            assert_eq!(p.rarity, RarityTier::Common);
        }
    }

    #[test]
    fn tier_distribution_tracks_weights() {
        let table = PaletteTable::builtin();
        let mut legendary = 0u64;
        let mut common = 0u64;
        let trials: u64 = 5000;
        for seed in 0..trials {
            let p = select_palette(&mut SeededRng::new(seed), &table).unwrap();
            match p.rarity {
                RarityTier::Legendary => legendary += 1,
                RarityTier::Common => common += 1,
                _ => {}
            }
        }
        // Expected ~4% legendary, ~52% common.
        assert!(legendary > trials / 100, "legendary {legendary}");
        assert!(legendary < trials / 10, "legendary {legendary}");
        assert!(common > trials * 2 / 5, "common {common}");
    }
}
