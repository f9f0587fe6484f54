//! Cliques command implementation
//!
//! Reports how similar the recordings of each work are to one another.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use claraprint_core::{Algorithm, ScoreKind};
use claraprint_eval::{clique_similarity, CliqueReport, Dataset};
use colored::Colorize;

use super::json_output::{self, error_codes};

/// Loads the dataset and scores every work group.
pub fn cliques(dataset: &str, algorithm: &str, duration_secs: u32, metric: &str) -> Result<CliqueReport> {
    let algorithm: Algorithm = algorithm.parse()?;
    let metric: ScoreKind = metric.parse().map_err(anyhow::Error::msg)?;
    let dataset = Dataset::from_file(Path::new(dataset))
        .with_context(|| format!("Failed to load dataset {}", dataset))?;
    Ok(clique_similarity(&dataset, algorithm, duration_secs, metric))
}

/// Run the cliques command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    dataset: &str,
    algorithm: &str,
    duration_secs: u32,
    metric: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let outcome = cliques(dataset, algorithm, duration_secs, metric);
    if json_output {
        return json_output::emit(outcome, error_codes::FILE_READ, Some(dataset));
    }

    let report = outcome?;
    println!(
        "{} {} at {}s, {}",
        "Clique similarity:".cyan().bold(),
        report.algorithm,
        report.duration_secs,
        report.metric
    );
    for work in &report.works {
        println!(
            "  {:<24} {:.4} over {} pair(s)",
            work.work_id, work.mean_score, work.pairs
        );
    }
    if report.skipped_works > 0 {
        println!(
            "  {} {} work(s) with fewer than two fingerprints skipped",
            "!".yellow(),
            report.skipped_works
        );
    }
    let s = &report.summary;
    println!(
        "\n{} mean {:.4}  min {:.4}  max {:.4}  std {:.4}",
        "Summary:".green().bold(),
        s.mean,
        s.min,
        s.max,
        s.std
    );
    Ok(ExitCode::SUCCESS)
}
