//! Claraprint Evaluation - Top-K Retrieval Quality of Transition Fingerprints
//!
//! This crate measures how well combined fingerprints retrieve their own work
//! from a labeled dataset, either through a lexical index over shingle tokens
//! or by direct pairwise comparison.
//!
//! # Determinism
//!
//! Every random draw goes through a PCG32 generator whose seed is derived with
//! BLAKE3 from the configured seed, the run and the round index. Hit counts
//! are reproducible from a configuration; timings are not.
//!
//! # Example
//!
//! ```
//! use claraprint_eval::{Dataset, EvaluationConfig, Evaluator, MemoryIndex};
//!
//! let dataset = Dataset::from_json_str(r#"{"works": [
//!     {"work_id": "w1", "recordings": [
//!         {"recording_id": "a", "excerpts": [{"duration_secs": 120, "algorithm": "chords_crema", "fingerprint": "fmfmfm"}]},
//!         {"recording_id": "b", "excerpts": [{"duration_secs": 120, "algorithm": "chords_crema", "fingerprint": "fmfmfa"}]}
//!     ]}
//! ]}"#)?;
//! let config = EvaluationConfig::from_json_str(r#"{"algorithms": ["chords_crema"], "rounds": 2}"#)?;
//!
//! let report = Evaluator::new(&dataset, &config)?.run(&mut MemoryIndex::new())?;
//! assert_eq!(report.configurations[0].cutoffs[0].hit_rate.mean, 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Structure
//!
//! - [`dataset`]: works, recordings and manifest-driven dataset building
//! - [`retrieval`]: the retrieval collaborator trait
//! - [`memory_index`]: in-process inverted index
//! - [`pairwise`]: index-free pairwise ranking
//! - [`config`]: validated evaluation configuration
//! - [`evaluate`]: the match evaluator
//! - [`stats`]: round scores and summaries
//! - [`clique`]: similarity inside work groups
//! - [`rng`]: seeded random streams

pub mod clique;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod memory_index;
pub mod pairwise;
pub mod retrieval;
pub mod rng;
pub mod stats;

// Re-export main types
pub use clique::{clique_similarity, CliqueReport, WorkSimilarity};
pub use config::{Backend, EvaluationConfig, QueryStrategy, RunSettings};
pub use dataset::{build_dataset, build_dataset_from_file, Dataset, DatasetManifest, Recording, Work};
pub use error::{ConfigError, DatasetError, EvalError, RetrievalError};
pub use evaluate::{ConfigurationReport, EvaluationReport, Evaluator};
pub use memory_index::MemoryIndex;
pub use pairwise::PairwiseIndex;
pub use retrieval::{Document, Hit, Query, Retrieval};
pub use stats::{CutoffSummary, RoundScores, Summary};

/// Crate version, recorded in evaluation reports.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the retrieval collaborator a configuration asks for.
pub fn retrieval_for(backend: Backend) -> Box<dyn Retrieval> {
    match backend {
        Backend::Index => Box::new(MemoryIndex::new()),
        Backend::Pairwise { scorer } => Box::new(PairwiseIndex::new(scorer)),
    }
}
