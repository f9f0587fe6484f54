//! Claraprint CLI - fingerprint annotations and evaluate cover-song retrieval
//!
//! This binary provides commands for encoding annotations, comparing
//! fingerprints, building datasets and running retrieval evaluations.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use claraprint_cli::commands;
use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    claraprint_cli::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            input,
            algorithm,
            alphabet,
            min_count,
            duration_threshold_ms,
            right_slash,
            keep_flats,
            json,
        } => {
            let args = commands::encode::EncodeArgs {
                input,
                algorithm,
                alphabet,
                min_count,
                duration_threshold_ms,
                right_slash,
                keep_flats,
            };
            commands::encode::run(&args, json)
        }
        Commands::Shingle {
            fingerprint,
            min,
            max,
            distinct,
            json,
        } => commands::shingle::run(&fingerprint, min, max, distinct, json),
        Commands::Compare { a, b, metric, json } => {
            commands::compare::run(&a, &b, metric.as_deref(), json)
        }
        Commands::BuildDataset {
            manifest,
            output,
            json,
        } => commands::build_dataset::run(&manifest, &output, json),
        Commands::Evaluate {
            dataset,
            config,
            output,
            json,
        } => commands::evaluate::run(&dataset, &config, output.as_deref(), json),
        Commands::Cliques {
            dataset,
            algorithm,
            duration,
            metric,
            json,
        } => commands::cliques::run(&dataset, &algorithm, duration, &metric, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_compare() {
        let cli =
            Cli::try_parse_from(["claraprint", "compare", "--a", "abc", "--b", "abd"]).unwrap();
        match cli.command {
            Commands::Compare { a, b, metric, json } => {
                assert_eq!(a, "abc");
                assert_eq!(b, "abd");
                assert!(metric.is_none());
                assert!(!json);
            }
            _ => panic!("expected compare command"),
        }
    }

    #[test]
    fn test_cli_parses_encode_overrides() {
        let cli = Cli::try_parse_from([
            "claraprint",
            "encode",
            "--input",
            "song.json",
            "--algorithm",
            "melody_melodia",
            "--min-count",
            "3",
            "--keep-flats",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Encode {
                input,
                algorithm,
                min_count,
                keep_flats,
                right_slash,
                json,
                ..
            } => {
                assert_eq!(input, "song.json");
                assert_eq!(algorithm, "melody_melodia");
                assert_eq!(min_count, Some(3));
                assert!(keep_flats);
                assert!(!right_slash);
                assert!(json);
            }
            _ => panic!("expected encode command"),
        }
    }

    #[test]
    fn test_cli_shingle_defaults() {
        let cli = Cli::try_parse_from(["claraprint", "shingle", "--fingerprint", "abcd"]).unwrap();
        match cli.command {
            Commands::Shingle {
                min, max, distinct, ..
            } => {
                assert_eq!((min, max), (2, 6));
                assert!(!distinct);
            }
            _ => panic!("expected shingle command"),
        }
    }

    #[test]
    fn test_cli_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from([
            "claraprint",
            "evaluate",
            "--dataset",
            "d.json",
            "--config",
            "c.json",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Evaluate { output: None, .. }));
    }

    #[test]
    fn test_cli_cliques_defaults() {
        let cli = Cli::try_parse_from([
            "claraprint",
            "cliques",
            "--dataset",
            "d.json",
            "--algorithm",
            "chords_crema",
        ])
        .unwrap();
        match cli.command {
            Commands::Cliques {
                duration, metric, ..
            } => {
                assert_eq!(duration, 120);
                assert_eq!(metric, "edit");
            }
            _ => panic!("expected cliques command"),
        }
    }

    #[test]
    fn test_encode_help_lists_registered_algorithms() {
        let help = match Cli::try_parse_from(["claraprint", "encode", "--help"]) {
            Err(e) => e.to_string(),
            Ok(_) => panic!("expected help output"),
        };
        for algorithm in claraprint_core::Algorithm::ALL {
            assert!(help.contains(algorithm.as_str()), "{algorithm} missing from help");
        }
        assert!(!help.contains("madmom"));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["claraprint"]).is_err());
    }
}
