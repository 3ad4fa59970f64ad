//! Loomgen CLI - Deterministic woven artwork generation
//!
//! This binary provides commands for generating woven textile artworks,
//! listing the palette collection, and verifying recorded outputs.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use loomgen_cli::commands;

/// Loomgen - Deterministic Woven Artwork Generator
#[derive(Parser)]
#[command(name = "loomgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one artifact from a seed
    Generate {
        /// 64-bit generation seed
        #[arg(short, long)]
        seed: u64,

        /// Use the named palette instead of rarity-weighted selection
        #[arg(short, long)]
        palette: Option<String>,

        /// Text row woven into the artifact (repeat for multiple rows, max 5)
        #[arg(short, long = "text")]
        text: Vec<String>,

        /// Write the rendered artifact to this PNG file
        #[arg(short, long)]
        output: Option<String>,

        /// Write a generation record (for `verify`) to this JSON file
        #[arg(short, long)]
        record: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the built-in palette collection by rarity tier
    Palettes {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Regenerate from a saved record and check the output hashes
    Verify {
        /// Path to the *.record.json file written by `generate --record`
        #[arg(short, long)]
        record: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            seed,
            palette,
            text,
            output,
            record,
            json,
        } => commands::generate::run(
            seed,
            palette.as_deref(),
            &text,
            output.as_deref(),
            record.as_deref(),
            json,
        ),
        Commands::Palettes { json } => commands::palettes::run(json),
        Commands::Verify { record, json } => commands::verify::run(&record, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
