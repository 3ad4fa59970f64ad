//! Verify command implementation
//!
//! Regenerates an artifact from a saved generation record and checks that
//! the artifact and command stream hashes still match. A mismatch means the
//! pipeline no longer reproduces the recorded output.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::generate::{run_pipeline, GenerationRecord};
use super::json_output::{error_codes, JsonError};

/// JSON output for the verify command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutput {
    /// Whether verification succeeded (all hashes matched)
    pub success: bool,
    /// Errors encountered during verification
    pub errors: Vec<JsonError>,
    /// Per-hash comparison results (on successful regeneration)
    pub checks: Vec<HashCheck>,
}

/// One recorded-vs-regenerated hash comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashCheck {
    pub name: String,
    pub expected: String,
    pub actual: String,
    pub matched: bool,
}

impl HashCheck {
    fn new(name: &str, expected: &str, actual: &str) -> Self {
        Self {
            name: name.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            matched: expected == actual,
        }
    }
}

/// Run the verify command.
///
/// # Returns
/// Exit code: 0 if all hashes match, 1 on mismatch or error
pub fn run(record_path: &str, json_output: bool) -> Result<ExitCode> {
    let record = match load_record(Path::new(record_path)) {
        Ok(r) => r,
        Err(e) => {
            let error =
                JsonError::new(error_codes::FILE_IO, format!("{e:#}")).with_file(record_path);
            return fail(json_output, vec![error]);
        }
    };

    let (regenerated, _) = match run_pipeline(&record.request) {
        Ok(out) => out,
        Err(e) => {
            let error = JsonError::new(error_codes::GENERATION_ERROR, format!("{e:#}"));
            return fail(json_output, vec![error]);
        }
    };

    let checks = vec![
        HashCheck::new("artifact", &record.artifact_hash, &regenerated.artifact_hash),
        HashCheck::new("stream", &record.stream_hash, &regenerated.stream_hash),
    ];
    let success = checks.iter().all(|c| c.matched);

    if json_output {
        let errors = if success {
            Vec::new()
        } else {
            vec![JsonError::new(
                error_codes::HASH_MISMATCH,
                "regenerated output does not match the record",
            )
            .with_file(record_path)]
        };
        let output = VerifyOutput {
            success,
            errors,
            checks,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .expect("VerifyOutput serialization should not fail")
        );
    } else {
        println!("{} {}", "Record:".cyan().bold(), record_path);
        println!("{} {}", "Seed:".dimmed(), record.request.seed);
        for check in &checks {
            let status = if check.matched {
                "PASS".green()
            } else {
                "FAIL".red()
            };
            println!("  {} {} hash", status, check.name);
            if !check.matched {
                println!("       expected {}", check.expected.dimmed());
                println!("       actual   {}", check.actual.dimmed());
            }
        }
        if success {
            println!("\n{} output is reproducible", "PASSED".green().bold());
        } else {
            println!("\n{} output has drifted", "FAILED".red().bold());
        }
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn fail(json_output: bool, errors: Vec<JsonError>) -> Result<ExitCode> {
    if json_output {
        let output = VerifyOutput {
            success: false,
            errors,
            checks: Vec::new(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .expect("VerifyOutput serialization should not fail")
        );
    } else {
        for error in &errors {
            eprintln!("{} {}", "ERROR".red().bold(), error.message);
        }
    }
    Ok(ExitCode::from(1))
}

/// Load a generation record from a JSON file.
fn load_record(path: &Path) -> Result<GenerationRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record JSON: {}", path.display()))
}
