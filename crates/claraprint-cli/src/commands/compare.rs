//! Compare command implementation
//!
//! Scores two fingerprints against each other with one or every similarity
//! function.

use std::process::ExitCode;

use anyhow::Result;
use claraprint_core::ScoreKind;
use colored::Colorize;
use serde::Serialize;

use super::json_output::{self, error_codes};

/// One similarity value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    /// Similarity function.
    pub metric: ScoreKind,
    /// Its value, higher is more similar.
    pub score: f64,
}

/// Result of the compare command.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    /// First fingerprint.
    pub a: String,
    /// Second fingerprint.
    pub b: String,
    /// Whether both are the same string.
    pub identical: bool,
    /// Requested scores.
    pub scores: Vec<MetricScore>,
}

/// Scores `a` against `b`. Every metric is used when `metric` is `None`.
pub fn compare_fingerprints(a: &str, b: &str, metric: Option<&str>) -> Result<CompareResult> {
    let metrics = match metric {
        Some(name) => vec![name.parse::<ScoreKind>().map_err(anyhow::Error::msg)?],
        None => ScoreKind::ALL.to_vec(),
    };
    let scores = metrics
        .into_iter()
        .map(|metric| MetricScore {
            metric,
            score: metric.score(a, b),
        })
        .collect();

    Ok(CompareResult {
        a: a.to_string(),
        b: b.to_string(),
        identical: a == b,
        scores,
    })
}

/// Run the compare command
///
/// # Arguments
/// * `a` - First fingerprint
/// * `b` - Second fingerprint
/// * `metric` - Similarity function name, or all of them
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(a: &str, b: &str, metric: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let outcome = compare_fingerprints(a, b, metric);
    if json_output {
        return json_output::emit(outcome, error_codes::INVALID_ARGUMENT, None);
    }

    let result = outcome?;
    println!("{}", "Comparing fingerprints:".cyan().bold());
    println!("  {} {}", "A:".dimmed(), result.a);
    println!("  {} {}", "B:".dimmed(), result.b);
    if result.identical {
        println!("\n{}", "Fingerprints are identical!".green().bold());
    }

    println!("\n{}", "Similarity:".cyan().bold());
    for score in &result.scores {
        println!("  {:<24} {}", score.metric.as_str(), format_score(score.score));
    }
    Ok(ExitCode::SUCCESS)
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score)
    } else {
        format!("{:.4}", score)
    }
}
