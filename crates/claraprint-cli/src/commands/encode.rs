//! Encode command implementation
//!
//! Reads one annotation file, normalizes it and prints the canonical symbols
//! and the fingerprint.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use claraprint_core::pipeline::{fingerprint, Annotation, FingerprintOptions};
use claraprint_core::{Algorithm, AlphabetKind};
use colored::Colorize;
use serde::Serialize;

use super::json_output::{self, error_codes, CliFailure};

/// Encoding settings taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct EncodeArgs {
    /// Annotation file path.
    pub input: String,
    /// Algorithm name.
    pub algorithm: String,
    /// Alphabet override.
    pub alphabet: Option<String>,
    /// Melody run-length override.
    pub min_count: Option<usize>,
    /// Chord duration threshold override, in milliseconds.
    pub duration_threshold_ms: Option<f64>,
    /// Use slash-chord bass notes.
    pub right_slash: bool,
    /// Keep flat roots as written.
    pub keep_flats: bool,
}

/// Result of the encode command.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeResult {
    /// Annotation file path.
    pub input: String,
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Alphabet used.
    pub alphabet: AlphabetKind,
    /// Canonical symbols.
    pub symbols: Vec<String>,
    /// Encoded fingerprint.
    pub fingerprint: String,
    /// Fingerprint length in letters.
    pub length: usize,
}

/// Run the encode command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &EncodeArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        json_output::emit(encode_file(args), error_codes::FILE_READ, Some(&args.input))
    } else {
        run_human(args)
    }
}

fn run_human(args: &EncodeArgs) -> Result<ExitCode> {
    let result = encode_file(args)?;

    println!("{} {}", "Encoding:".cyan().bold(), result.input);
    println!("  {} {}", "Algorithm:".dimmed(), result.algorithm);
    println!("  {} {}", "Alphabet:".dimmed(), result.alphabet);
    println!(
        "  {} {} ({})",
        "Symbols:".dimmed(),
        result.symbols.join(" "),
        result.symbols.len()
    );

    if result.fingerprint.is_empty() {
        println!(
            "\n{} fewer than two symbols, fingerprint is empty",
            "!".yellow()
        );
    } else {
        println!(
            "\n{} {} ({} letters)",
            "Fingerprint:".green().bold(),
            result.fingerprint,
            result.length
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn options_from(args: &EncodeArgs) -> Result<FingerprintOptions> {
    let mut options = FingerprintOptions::default();
    if let Some(ms) = args.duration_threshold_ms {
        options.chords.duration_threshold_ms = ms;
    }
    options.chords.right_slash = args.right_slash;
    options.chords.resolve_enharmonics = !args.keep_flats;
    options.min_count = args.min_count;
    if let Some(name) = &args.alphabet {
        options.alphabet = Some(name.parse::<AlphabetKind>()?);
    }
    options.validate()?;
    Ok(options)
}

/// Encodes the annotation file named in `args`.
pub fn encode_file(args: &EncodeArgs) -> Result<EncodeResult> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let options = options_from(args)?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read annotation: {}", args.input))?;
    let annotation: Annotation = serde_json::from_str(&content).with_context(|| {
        CliFailure::new(
            error_codes::JSON_PARSE,
            format!("Failed to parse annotation: {}", args.input),
        )
        .with_suggestion(r#"expected {"kind": "chords", "events": [...]} or {"kind": "melody", "frequencies": [...]}"#)
    })?;

    let encoded = fingerprint(&annotation, algorithm, &options)
        .with_context(|| format!("Failed to encode {}", args.input))?;

    Ok(EncodeResult {
        input: args.input.clone(),
        algorithm,
        alphabet: options.alphabet.unwrap_or_else(|| algorithm.default_alphabet()),
        symbols: encoded.symbols.into_vec(),
        length: encoded.fingerprint.len(),
        fingerprint: encoded.fingerprint.into_string(),
    })
}
