//! Build-dataset command implementation
//!
//! Fingerprints every annotation listed in a manifest and writes the
//! resulting dataset as JSON.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use claraprint_eval::dataset::build_dataset_from_file;
use colored::Colorize;
use serde::Serialize;

use super::json_output::{self, error_codes, CliFailure};

/// Result of the build-dataset command.
#[derive(Debug, Clone, Serialize)]
pub struct BuildDatasetResult {
    /// Manifest read.
    pub manifest: String,
    /// Dataset written.
    pub output: String,
    /// Works in the dataset.
    pub works: usize,
    /// Recordings in the dataset.
    pub recordings: usize,
    /// Fingerprints computed.
    pub excerpts: usize,
}

/// Builds and writes the dataset described by `manifest`.
pub fn build(manifest: &str, output: &str) -> Result<BuildDatasetResult> {
    let dataset = build_dataset_from_file(Path::new(manifest))
        .with_context(|| format!("Failed to build dataset from {}", manifest))?;
    dataset.write(Path::new(output)).with_context(|| {
        CliFailure::new(
            error_codes::FILE_WRITE,
            format!("Failed to write dataset {}", output),
        )
        .with_suggestion("check that the output directory exists and is writable")
    })?;

    let excerpts = dataset
        .works
        .iter()
        .flat_map(|w| &w.recordings)
        .map(|r| r.excerpts.len())
        .sum();
    Ok(BuildDatasetResult {
        manifest: manifest.to_string(),
        output: output.to_string(),
        works: dataset.works.len(),
        recordings: dataset.recording_count(),
        excerpts,
    })
}

/// Run the build-dataset command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(manifest: &str, output: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        return json_output::emit(build(manifest, output), error_codes::FILE_READ, Some(manifest));
    }

    println!("{} {}", "Building dataset from:".cyan().bold(), manifest);
    let result = build(manifest, output)?;
    println!("  {} {}", "Works:".dimmed(), result.works);
    println!("  {} {}", "Recordings:".dimmed(), result.recordings);
    println!("  {} {}", "Fingerprints:".dimmed(), result.excerpts);
    println!("\n{} {}", "Wrote".green().bold(), result.output);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claraprint_eval::Dataset;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_writes_dataset() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"kind": "melody", "frequencies": [440.0, 329.63, 440.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("manifest.json"),
            r#"{
                "options": {"min_count": 1},
                "works": [{"work_id": "w", "recordings": [{"recording_id": "r", "annotations": [
                    {"duration_secs": 30, "algorithm": "melody_piptrack", "path": "a.json"}
                ]}]}]
            }"#,
        )
        .unwrap();

        let manifest = dir.path().join("manifest.json");
        let output = dir.path().join("dataset.json");
        let result = build(manifest.to_str().unwrap(), output.to_str().unwrap()).unwrap();
        assert_eq!(result.works, 1);
        assert_eq!(result.excerpts, 1);

        let dataset = Dataset::from_file(&output).unwrap();
        let fp = dataset.works[0].recordings[0]
            .fingerprint(30, claraprint_core::Algorithm::MelodyPiptrack)
            .unwrap();
        // A -> E is up 8, i.e. down 6; E -> A is up 6
        assert_eq!(fp.as_str(), "t$");
    }

    #[test]
    fn test_unwritable_output_reports_write_code() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), r#"{"works": []}"#).unwrap();

        let manifest = dir.path().join("manifest.json");
        let output = dir.path().join("missing").join("dataset.json");
        let err = build(manifest.to_str().unwrap(), output.to_str().unwrap()).unwrap_err();

        let json = json_output::JsonError::from_anyhow(&err, error_codes::FILE_READ);
        assert_eq!(json.code, "CLI_005");
        assert!(json.message.starts_with("Failed to write dataset "));
        assert!(json.suggestion.is_some());
    }

    #[test]
    fn test_bad_manifest_keeps_library_code() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("manifest.json"),
            r#"{"options": {"min_count": 0}, "works": []}"#,
        )
        .unwrap();

        let manifest = dir.path().join("manifest.json");
        let output = dir.path().join("dataset.json");
        let err = build(manifest.to_str().unwrap(), output.to_str().unwrap()).unwrap_err();
        let json = json_output::JsonError::from_anyhow(&err, error_codes::FILE_READ);
        assert_eq!(json.code, "DATASET_007");
        assert!(!output.exists());
    }
}
