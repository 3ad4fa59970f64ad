//! Palettes command implementation
//!
//! Lists the built-in palette table, grouped by rarity tier.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;

use loomgen_spec::{PaletteTable, RarityTier};

/// One row of palette listing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub name: String,
    pub rarity: RarityTier,
    pub colors: Vec<String>,
}

const TIERS: [RarityTier; 5] = [
    RarityTier::Legendary,
    RarityTier::Epic,
    RarityTier::Rare,
    RarityTier::Uncommon,
    RarityTier::Common,
];

/// Run the palettes command.
pub fn run(json_output: bool) -> Result<ExitCode> {
    let table = PaletteTable::builtin();

    if json_output {
        let entries: Vec<PaletteEntry> = TIERS
            .iter()
            .flat_map(|tier| table.by_tier(*tier))
            .map(|p| PaletteEntry {
                name: p.name.clone(),
                rarity: p.rarity,
                colors: p.colors.iter().map(|c| c.to_string()).collect(),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries)
                .expect("PaletteEntry serialization should not fail")
        );
        return Ok(ExitCode::SUCCESS);
    }

    for tier in TIERS {
        let palettes = table.by_tier(tier);
        if palettes.is_empty() {
            continue;
        }
        println!("{}", tier.name().bold());
        for palette in palettes {
            println!("  {} ({} colors)", palette.name, palette.colors.len());
        }
    }
    println!("\n{} palettes total", table.len());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_listing_succeeds() {
        assert_eq!(run(true).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(false).unwrap(), ExitCode::SUCCESS);
    }
}
