//! Shingle command implementation

use std::process::ExitCode;

use anyhow::Result;
use claraprint_core::shingle::{shingle, shingle_distinct, WordLengths};
use colored::Colorize;
use serde::Serialize;

use super::json_output::{self, error_codes};

/// Result of the shingle command.
#[derive(Debug, Clone, Serialize)]
pub struct ShingleResult {
    /// Input fingerprint.
    pub fingerprint: String,
    /// Word-length range used.
    pub word_lengths: WordLengths,
    /// Whether duplicates were removed per length.
    pub distinct: bool,
    /// The words, shortest first.
    pub words: Vec<String>,
}

/// Splits `fingerprint` into words of `min..=max` letters.
pub fn shingle_fingerprint(
    fingerprint: &str,
    min: usize,
    max: usize,
    distinct: bool,
) -> Result<ShingleResult> {
    let word_lengths = WordLengths::new(min, max)?;
    let words = if distinct {
        shingle_distinct(fingerprint, word_lengths)
    } else {
        shingle(fingerprint, word_lengths)
    };
    Ok(ShingleResult {
        fingerprint: fingerprint.to_string(),
        word_lengths,
        distinct,
        words,
    })
}

/// Run the shingle command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(fingerprint: &str, min: usize, max: usize, distinct: bool, json_output: bool) -> Result<ExitCode> {
    let outcome = shingle_fingerprint(fingerprint, min, max, distinct);
    if json_output {
        return json_output::emit(outcome, error_codes::INVALID_ARGUMENT, None);
    }

    let result = outcome?;
    println!(
        "{} {} ({}..={})",
        "Shingling:".cyan().bold(),
        result.fingerprint,
        min,
        max
    );
    for len in result.word_lengths.iter() {
        let words: Vec<&str> = result
            .words
            .iter()
            .filter(|w| w.chars().count() == len)
            .map(String::as_str)
            .collect();
        println!("  {} {}", format!("{}:", len).dimmed(), words.join(" "));
    }
    println!("{} {} words", "Total:".green().bold(), result.words.len());
    Ok(ExitCode::SUCCESS)
}
