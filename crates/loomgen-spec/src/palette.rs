//! Color palette table and rarity tiers.
//!
//! Palettes are read-only input to generation. The built-in table covers the
//! shipped collection; external tables can be loaded from JSON with the same
//! shape (`[{ "name": ..., "colors": ["#RRGGBB", ...], "rarity": ... }]`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Rarity tier of a palette, from most to least common.
///
/// Declaration order matters: it is the tie-break order for derived traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    /// Display name, e.g. for trait metadata.
    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An sRGB color stored as 8-bit channels, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    /// Parse a `#RRGGBB` string.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self([r, g, b]))
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color {s:?}")))
    }
}

/// A named, ordered color palette with a rarity tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<HexColor>,
    pub rarity: RarityTier,
}

/// Read-only collection of palettes available to generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteTable {
    palettes: Vec<Palette>,
}

impl PaletteTable {
    /// The built-in palette collection.
    pub fn builtin() -> Self {
        let palettes = BUILTIN_PALETTES
            .iter()
            .map(|(name, rarity, colors)| Palette {
                name: (*name).to_string(),
                colors: colors
                    .iter()
                    .map(|hex| {
                        HexColor::parse(hex).expect("built-in palette table is well-formed")
                    })
                    .collect(),
                rarity: *rarity,
            })
            .collect();
        Self { palettes }
    }

    /// Load a table from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let table: Self =
            serde_json::from_str(json).map_err(|e| SpecError::MalformedTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Wrap an explicit palette list.
    pub fn from_palettes(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    /// A table must be non-empty and must carry at least one Common entry,
    /// since Common is the universal selection fallback.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.palettes.is_empty() {
            return Err(SpecError::EmptyPaletteTable);
        }
        if !self
            .palettes
            .iter()
            .any(|p| p.rarity == RarityTier::Common)
        {
            return Err(SpecError::NoCommonPalette);
        }
        Ok(())
    }

    /// Look up a palette by exact name.
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// All palettes of the given tier, in table order.
    pub fn by_tier(&self, tier: RarityTier) -> Vec<&Palette> {
        self.palettes.iter().filter(|p| p.rarity == tier).collect()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }
}

type PaletteRow = (&'static str, RarityTier, &'static [&'static str]);

#[rustfmt::skip]
const BUILTIN_PALETTES: &[PaletteRow] = &[
    // Common: everyday collection
    ("Classic Red & Black", RarityTier::Common,
     &["#8B0000", "#DC143C", "#B22222", "#000000", "#2F2F2F", "#696969", "#8B4513", "#A0522D"]),
    ("Natural Jute & Hemp", RarityTier::Common,
     &["#F5DEB3", "#DEB887", "#D2B48C", "#BC8F8F", "#8B7355", "#A0522D", "#654321", "#2F2F2F"]),
    ("Coastal Blue & White", RarityTier::Common,
     &["#4682B4", "#5F9EA0", "#87CEEB", "#B0E0E6", "#F8F8FF", "#F0F8FF", "#E6E6FA", "#B0C4DE"]),
    ("Rustic Farmhouse", RarityTier::Common,
     &["#8B4513", "#A0522D", "#CD853F", "#D2691E", "#F4A460", "#DEB887", "#F5DEB3", "#F4E4BC"]),
    ("Modern Gray & White", RarityTier::Common,
     &["#F5F5F5", "#FFFFFF", "#D3D3D3", "#C0C0C0", "#A9A9A9", "#808080", "#696969", "#2F2F2F"]),
    ("Autumn Harvest", RarityTier::Common,
     &["#8B4513", "#D2691E", "#CD853F", "#F4A460", "#8B0000", "#B22222", "#FF8C00", "#FFA500"]),
    ("Spring Garden", RarityTier::Common,
     &["#228B22", "#32CD32", "#90EE90", "#98FB98", "#FF69B4", "#FFB6C1", "#87CEEB", "#F0E68C"]),
    ("Industrial Metal", RarityTier::Common,
     &["#2F4F4F", "#696969", "#808080", "#A9A9A9", "#C0C0C0", "#D3D3D3", "#F5F5F5", "#000000"]),
    ("Mediterranean", RarityTier::Common,
     &["#FF6347", "#FF4500", "#FF8C00", "#FFA500", "#F4A460", "#DEB887", "#87CEEB", "#4682B4"]),
    ("Scandinavian", RarityTier::Common,
     &["#FFFFFF", "#F8F9FA", "#E9ECEF", "#DEE2E6", "#CED4DA", "#ADB5BD", "#6C757D", "#495057"]),
    ("Nordic Forest", RarityTier::Common,
     &["#2D5016", "#3A5F0B", "#4A7C59", "#5D8B66", "#6B8E23", "#8FBC8F", "#9ACD32", "#ADFF2F"]),
    ("Desert Sunset", RarityTier::Common,
     &["#CD853F", "#DEB887", "#F4A460", "#D2B48C", "#BC8F8F", "#8B4513", "#A0522D", "#D2691E"]),
    ("Arctic Ice", RarityTier::Common,
     &["#F0F8FF", "#E6E6FA", "#B0C4DE", "#87CEEB", "#B0E0E6", "#F0FFFF", "#E0FFFF", "#F5F5F5"]),
    ("Tropical Paradise", RarityTier::Common,
     &["#FF6347", "#FF4500", "#FF8C00", "#FFA500", "#32CD32", "#90EE90", "#98FB98", "#00CED1"]),
    ("Kerala", RarityTier::Common,
     &["#228B22", "#32CD32", "#90EE90", "#98FB98", "#00CED1", "#87CEEB", "#4682B4", "#000080"]),
    ("Bengal", RarityTier::Common,
     &["#228B22", "#32CD32", "#90EE90", "#F5DEB3", "#DEB887", "#8B4513", "#4682B4", "#000080"]),
    ("Kashmir", RarityTier::Common,
     &["#87CEEB", "#B0E0E6", "#E0FFFF", "#F0F8FF", "#E6E6FA", "#B0C4DE", "#4682B4", "#000080"]),
    ("Thanjavur Art", RarityTier::Common,
     &["#FFD700", "#FFA500", "#FF8C00", "#FF6347", "#FF4500", "#8B0000", "#228B22", "#006400"]),

    // Uncommon: regional collection
    ("Tamil Nadu Temple", RarityTier::Uncommon,
     &["#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#FF1493", "#8B0000", "#4B0082", "#000080"]),
    ("Kerala Onam", RarityTier::Uncommon,
     &["#FFF8E7", "#FFD700", "#E94F37", "#393E41", "#3F88C5", "#F7C873", "#FFB347", "#FF6961"]),
    ("Chettinad Spice", RarityTier::Uncommon,
     &["#D72631", "#A2D5C6", "#077B8A", "#5C3C92", "#F4F4F4", "#FFD700", "#8B0000", "#1A2634"]),
    ("Chennai Monsoon", RarityTier::Uncommon,
     &["#1D3557", "#457B9D", "#A8DADC", "#F1FAEE", "#FFD700", "#E94F37", "#393E41", "#3F88C5"]),
    ("Bengal Indigo", RarityTier::Uncommon,
     &["#1A2634", "#3F88C5", "#F7C873", "#E94F37", "#FFF8E7", "#FFD700", "#393E41", "#1D3557"]),

    // Rare: classical collection
    ("Tamil Cultural", RarityTier::Rare,
     &["#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#FF1493", "#8B0000", "#4B0082", "#000080"]),
    ("Tamil Classical", RarityTier::Rare,
     &["#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#FF1493", "#8B0000", "#4B0082", "#000080"]),
    ("Sangam Era", RarityTier::Rare,
     &["#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#FF1493", "#8B0000", "#4B0082", "#000080"]),
    ("Pandya Dynasty", RarityTier::Rare,
     &["#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#00CED1", "#87CEEB", "#4682B4", "#000080"]),
    ("Maratha Empire", RarityTier::Rare,
     &["#8B0000", "#DC143C", "#B22222", "#FF4500", "#FF8C00", "#FFD700", "#228B22", "#006400"]),
    ("Rajasthani", RarityTier::Rare,
     &["#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#FF1493", "#8B0000", "#4B0082", "#000080"]),

    // Epic: bird and textile collection
    ("Indian Peacock", RarityTier::Epic,
     &["#000080", "#191970", "#4169E1", "#4682B4", "#00CED1", "#40E0D0", "#48D1CC", "#20B2AA"]),
    ("Flamingo", RarityTier::Epic,
     &["#FF69B4", "#FF1493", "#FFB6C1", "#FFC0CB", "#FF6347", "#FF4500", "#FF8C00", "#FFA500"]),
    ("Toucan", RarityTier::Epic,
     &["#FFD700", "#FFA500", "#FF8C00", "#FF6347", "#FF4500", "#000000", "#FFFFFF", "#FF1493"]),
    ("Madras Checks", RarityTier::Epic,
     &["#8B0000", "#DC143C", "#FF4500", "#FF6347", "#FF8C00", "#FFD700", "#228B22", "#006400"]),
    ("Kanchipuram Silk", RarityTier::Epic,
     &["#8B0000", "#DC143C", "#B22222", "#FF4500", "#FF8C00", "#FFD700", "#228B22", "#006400"]),

    // Legendary: dynasty collection
    ("Chola Dynasty", RarityTier::Legendary,
     &["#8B0000", "#DC143C", "#B22222", "#FF4500", "#FF8C00", "#FFD700", "#228B22", "#006400"]),
    ("Maurya Empire", RarityTier::Legendary,
     &["#000080", "#191970", "#4169E1", "#4682B4", "#FFD700", "#FFA500", "#8B4513", "#A0522D"]),
    ("Jamakalam", RarityTier::Legendary,
     &["#8B0000", "#DC143C", "#FFD700", "#FFA500", "#228B22", "#32CD32", "#4B0082", "#000000"]),
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let table = PaletteTable::builtin();
        assert!(table.validate().is_ok());
        assert!(table.len() >= 30);
    }

    #[test]
    fn every_tier_is_represented() {
        let table = PaletteTable::builtin();
        for tier in [
            RarityTier::Common,
            RarityTier::Uncommon,
            RarityTier::Rare,
            RarityTier::Epic,
            RarityTier::Legendary,
        ] {
            assert!(!table.by_tier(tier).is_empty(), "no {tier} palettes");
        }
    }

    #[test]
    fn lookup_by_name() {
        let table = PaletteTable::builtin();
        let p = table.get("Tamil Cultural").unwrap();
        assert_eq!(p.rarity, RarityTier::Rare);
        assert_eq!(p.colors.len(), 8);
        assert!(table.get("No Such Palette").is_none());
    }

    #[test]
    fn regional_tier_assignments() {
        let table = PaletteTable::builtin();
        for name in ["Kerala", "Bengal", "Kashmir", "Thanjavur Art"] {
            assert_eq!(table.get(name).unwrap().rarity, RarityTier::Common, "{name}");
        }
        for name in [
            "Tamil Nadu Temple",
            "Kerala Onam",
            "Chettinad Spice",
            "Chennai Monsoon",
            "Bengal Indigo",
        ] {
            assert_eq!(table.get(name).unwrap().rarity, RarityTier::Uncommon, "{name}");
        }
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(HexColor::parse("#FF8C00"), Some(HexColor([255, 140, 0])));
        assert_eq!(HexColor::parse("FF8C00"), None);
        assert_eq!(HexColor::parse("#FF8C0"), None);
        assert_eq!(HexColor::parse("#GG8C00"), None);
    }

    #[test]
    fn hex_display_roundtrip() {
        let c = HexColor([11, 160, 255]);
        assert_eq!(HexColor::parse(&c.to_string()), Some(c));
    }

    #[test]
    fn empty_table_fails_validation() {
        let table = PaletteTable::from_palettes(vec![]);
        assert_eq!(table.validate(), Err(SpecError::EmptyPaletteTable));
    }

    #[test]
    fn all_rare_table_fails_validation() {
        let table = PaletteTable::from_palettes(vec![Palette {
            name: "Only Rare".into(),
            colors: vec![HexColor([1, 2, 3])],
            rarity: RarityTier::Rare,
        }]);
        assert_eq!(table.validate(), Err(SpecError::NoCommonPalette));
    }

    #[test]
    fn json_roundtrip() {
        let table = PaletteTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        let back = PaletteTable::from_json(&json).unwrap();
        assert_eq!(table, back);
    }
}
