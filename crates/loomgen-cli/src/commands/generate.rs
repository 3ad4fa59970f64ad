//! Generate command implementation
//!
//! Runs the full pipeline for one seed and writes the requested outputs:
//! a PNG render, a generation record for later verification, or both.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use loomgen_backend_weave::generate::{generate, ArtifactConfig};
use loomgen_backend_weave::raster::{png_hash, RasterSurface};
use loomgen_backend_weave::surface::CommandRecorder;
use loomgen_backend_weave::Artifact;
use loomgen_spec::{ArtifactRequest, GlyphTable, PaletteTable};

use super::json_output::{error_codes, JsonError};

/// Everything needed to re-check a generation later: the request, the
/// artifact metadata, and the output hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub request: ArtifactRequest,
    pub artifact: Artifact,
    pub artifact_hash: String,
    pub stream_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png_hash: Option<String>,
}

/// JSON output for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<GenerationRecord>,
}

/// Build the record for a request without touching the filesystem.
pub fn run_pipeline(request: &ArtifactRequest) -> Result<(GenerationRecord, CommandRecorder)> {
    let mut recorder = CommandRecorder::new();
    let artifact = generate(
        request,
        &PaletteTable::builtin(),
        &GlyphTable::builtin(),
        &ArtifactConfig::default(),
        &mut recorder,
    )
    .context("generation failed")?;

    let record = GenerationRecord {
        artifact_hash: artifact.hash().context("artifact hash")?,
        stream_hash: recorder.stream_hash().context("stream hash")?,
        png_hash: None,
        request: request.clone(),
        artifact,
    };
    Ok((record, recorder))
}

/// Run the generate command.
///
/// # Returns
/// Exit code: 0 on success, 1 on any error
pub fn run(
    seed: u64,
    palette: Option<&str>,
    text: &[String],
    png_out: Option<&str>,
    record_out: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let mut request = ArtifactRequest::new(seed);
    request.palette_name = palette.map(str::to_string);
    request.text_rows = text.to_vec();

    let (mut record, recorder) = match run_pipeline(&request) {
        Ok(out) => out,
        Err(e) => {
            return fail(
                json_output,
                JsonError::new(error_codes::GENERATION_ERROR, format!("{e:#}")),
            );
        }
    };

    if let Some(path) = png_out {
        let config = ArtifactConfig::default();
        let mut surface =
            RasterSurface::for_artifact(config.width, config.height, config.fringe_length);
        recorder.replay(&mut surface);

        let bytes = match surface.encode_png() {
            Ok(b) => b,
            Err(e) => {
                return fail(
                    json_output,
                    JsonError::new(error_codes::PNG_WRITE, e.to_string()).with_file(path),
                );
            }
        };
        record.png_hash = Some(png_hash(&bytes));
        if let Err(e) = fs::write(Path::new(path), &bytes) {
            return fail(
                json_output,
                JsonError::new(error_codes::FILE_IO, e.to_string()).with_file(path),
            );
        }
    }

    if let Some(path) = record_out {
        let json = serde_json::to_string_pretty(&record).context("record serialization")?;
        if let Err(e) = fs::write(Path::new(path), json) {
            return fail(
                json_output,
                JsonError::new(error_codes::FILE_IO, e.to_string()).with_file(path),
            );
        }
    }

    if json_output {
        let output = GenerateOutput {
            success: true,
            errors: Vec::new(),
            record: Some(record),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .expect("GenerateOutput serialization should not fail")
        );
    } else {
        print_summary(&record, png_out);
    }

    Ok(ExitCode::SUCCESS)
}

fn fail(json_output: bool, error: JsonError) -> Result<ExitCode> {
    if json_output {
        let output = GenerateOutput {
            success: false,
            errors: vec![error],
            record: None,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .expect("GenerateOutput serialization should not fail")
        );
    } else {
        eprintln!("{} {}", "ERROR".red().bold(), error.message);
    }
    Ok(ExitCode::from(1))
}

fn print_summary(record: &GenerationRecord, png_out: Option<&str>) {
    let traits = &record.artifact.traits;

    println!("{} {}", "Seed:".cyan().bold(), record.request.seed);
    println!(
        "{} {} ({})",
        "Palette:".cyan().bold(),
        traits.palette_name,
        traits.palette_rarity_tier
    );
    println!(
        "{} {} stripes, {} pattern, complexity {}",
        "Weave:".cyan().bold(),
        traits.stripe_count,
        traits.pattern_type,
        traits.complexity
    );
    if traits.character_count > 0 {
        println!(
            "{} {} rows, {} characters",
            "Text:".cyan().bold(),
            traits.text_row_count,
            traits.character_count
        );
    }
    println!("{} {}", "Artifact hash:".dimmed(), record.artifact_hash);
    println!("{} {}", "Stream hash:".dimmed(), record.stream_hash);
    if let (Some(hash), Some(path)) = (&record.png_hash, png_out) {
        println!("{} {} ({})", "PNG:".dimmed(), path, hash);
    }
}
