//! CLI argument definitions for the Claraprint command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Claraprint - cover-song fingerprints from chord and melody transitions
#[derive(Parser)]
#[command(name = "claraprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Normalize an annotation file and print its fingerprint
    Encode {
        /// Path to the annotation JSON file
        #[arg(short, long)]
        input: String,

        /// Extraction algorithm (chords_chordino, chords_crema, melody_melodia, melody_piptrack)
        #[arg(short, long)]
        algorithm: String,

        /// Alphabet override (chord, overlap, melody)
        #[arg(long)]
        alphabet: Option<String>,

        /// Minimum run length for melody notes
        #[arg(long)]
        min_count: Option<usize>,

        /// Minimum chord duration in milliseconds
        #[arg(long)]
        duration_threshold_ms: Option<f64>,

        /// Use the bass note of slash chords
        #[arg(long)]
        right_slash: bool,

        /// Keep flat roots instead of mapping them to sharps
        #[arg(long)]
        keep_flats: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Split a fingerprint into overlapping words
    Shingle {
        /// Fingerprint to split
        #[arg(short, long)]
        fingerprint: String,

        /// Shortest word length
        #[arg(long, default_value_t = 2)]
        min: usize,

        /// Longest word length
        #[arg(long, default_value_t = 6)]
        max: usize,

        /// Drop repeated words within each length
        #[arg(long)]
        distinct: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Score two fingerprints against each other
    Compare {
        /// First fingerprint
        #[arg(short, long)]
        a: String,

        /// Second fingerprint
        #[arg(short, long)]
        b: String,

        /// Similarity function (edit, common-words, weighted-common-words); all when omitted
        #[arg(short, long)]
        metric: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Fingerprint every annotation in a manifest and write a dataset
    BuildDataset {
        /// Path to the manifest JSON file
        #[arg(short, long)]
        manifest: String,

        /// Dataset output path
        #[arg(short, long)]
        output: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run the retrieval evaluation described by a config file
    Evaluate {
        /// Path to the dataset JSON file
        #[arg(short, long)]
        dataset: String,

        /// Path to the evaluation config JSON file
        #[arg(short, long)]
        config: String,

        /// Write the full report to this path
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Score how similar the recordings of each work are
    Cliques {
        /// Path to the dataset JSON file
        #[arg(short, long)]
        dataset: String,

        /// Extraction algorithm whose fingerprints are compared
        #[arg(short, long)]
        algorithm: String,

        /// Excerpt duration in seconds
        #[arg(long, default_value_t = 120)]
        duration: u32,

        /// Similarity function
        #[arg(short, long, default_value = "edit")]
        metric: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
