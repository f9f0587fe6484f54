//! Evaluate command implementation
//!
//! Runs the match evaluator for one configuration file over one dataset and
//! prints per-cutoff hit-rate summaries.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use claraprint_eval::{retrieval_for, Dataset, EvaluationConfig, EvaluationReport, Evaluator};
use colored::Colorize;

use super::json_output::{self, error_codes, CliFailure};

/// Loads the dataset and config, runs the evaluation and optionally writes
/// the full report.
pub fn evaluate(dataset: &str, config: &str, output: Option<&str>) -> Result<EvaluationReport> {
    let dataset = Dataset::from_file(Path::new(dataset))
        .with_context(|| format!("Failed to load dataset {}", dataset))?;
    let config = EvaluationConfig::from_file(Path::new(config))
        .with_context(|| format!("Failed to load config {}", config))?;

    let mut retrieval = retrieval_for(config.backend);
    let report = Evaluator::new(&dataset, &config)?.run(retrieval.as_mut())?;

    if let Some(path) = output {
        let json = json_output::to_json(&report)?;
        fs::write(path, json).with_context(|| {
            CliFailure::new(error_codes::FILE_WRITE, format!("Failed to write report {}", path))
        })?;
    }
    Ok(report)
}

/// Run the evaluate command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(dataset: &str, config: &str, output: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        return json_output::emit(evaluate(dataset, config, output), error_codes::EVALUATION, None);
    }

    let report = evaluate(dataset, config, output)?;
    print_report(&report);
    if let Some(path) = output {
        println!("\n{} {}", "Wrote".green().bold(), path);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &EvaluationReport) {
    let algorithms: Vec<&str> = report.algorithms.iter().map(|a| a.as_str()).collect();
    println!("{}", "Evaluation:".cyan().bold());
    println!("  {} {}", "Algorithms:".dimmed(), algorithms.join(" + "));
    println!("  {} {}s", "Duration:".dimmed(), report.duration_secs);
    println!("  {} {}", "Backend:".dimmed(), report.backend);
    println!("  {} {}", "Combination:".dimmed(), report.combination_mode);
    println!("  {} {}", "Queries:".dimmed(), report.query_strategy);

    for run in &report.configurations {
        println!(
            "\n{} words {}..={}, {} source(s)",
            "Configuration:".cyan().bold(),
            run.word_lengths.min(),
            run.word_lengths.max(),
            run.source_count
        );
        println!(
            "  {} {} indexed, {} skipped",
            "Works:".dimmed(),
            run.indexed_works,
            run.skipped_works
        );
        if run.skipped_works > 0 {
            println!(
                "  {} {} work(s) had fewer than {} recordings",
                "!".yellow(),
                run.skipped_works,
                run.source_count
            );
        }
        for cutoff in &run.cutoffs {
            let s = &cutoff.hit_rate;
            println!(
                "  {:<8} mean {:.4}  min {:.4}  max {:.4}  std {:.4}",
                format!("top-{}", cutoff.cutoff),
                s.mean,
                s.min,
                s.max,
                s.std
            );
        }
        println!(
            "  {} store {:.6}s/doc, search {:.6}s/query",
            "Timing:".dimmed(),
            run.mean_store_secs,
            run.mean_search_secs
        );
    }
}
