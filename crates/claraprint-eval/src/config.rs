//! Evaluation configuration.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use claraprint_core::{Algorithm, CombinationMode, ScoreKind, WordLengths};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which recordings of an indexed work are used as queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStrategy {
    /// Every recording that was not used to build the work's document.
    #[default]
    EachRecording,
    /// One randomly drawn non-source recording per work.
    OnePerWork,
}

impl QueryStrategy {
    /// Name used in config files and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryStrategy::EachRecording => "each_recording",
            QueryStrategy::OnePerWork => "one_per_work",
        }
    }
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retrieval collaborator to evaluate against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// Lexical inverted index over shingle tokens.
    #[default]
    Index,
    /// Direct fingerprint comparison, no index.
    Pairwise {
        /// Similarity function ranking the documents.
        #[serde(default = "default_scorer")]
        scorer: ScoreKind,
    },
}

fn default_scorer() -> ScoreKind {
    ScoreKind::Edit
}

fn default_duration_secs() -> u32 {
    120
}

fn default_word_lengths() -> Vec<WordLengths> {
    vec![WordLengths::RETRIEVAL]
}

fn default_source_counts() -> Vec<usize> {
    vec![1]
}

fn default_cutoffs() -> Vec<usize> {
    vec![10, 5, 1]
}

fn default_rounds() -> u32 {
    10
}

/// A complete, named description of one evaluation.
///
/// # Example
///
/// ```
/// use claraprint_eval::EvaluationConfig;
///
/// let config = EvaluationConfig::from_json_str(r#"{"algorithms": ["chords_crema"]}"#).unwrap();
/// assert_eq!(config.rounds, 10);
/// assert_eq!(config.cutoffs, vec![10, 5, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Algorithms whose fingerprints are combined for every recording.
    pub algorithms: Vec<Algorithm>,
    /// Excerpt duration to read from the dataset.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    /// Word-length ranges, one evaluation per range.
    #[serde(default = "default_word_lengths")]
    pub word_lengths: Vec<WordLengths>,
    /// Recordings combined into each stored document, one evaluation per count.
    #[serde(default = "default_source_counts")]
    pub source_counts: Vec<usize>,
    /// Top-K cutoffs to score.
    #[serde(default = "default_cutoffs")]
    pub cutoffs: Vec<usize>,
    /// Independent rounds per evaluation.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// How tokens of several sources are merged.
    #[serde(default)]
    pub combination_mode: CombinationMode,
    /// Which recordings are queried.
    #[serde(default)]
    pub query_strategy: QueryStrategy,
    /// Retrieval collaborator.
    #[serde(default)]
    pub backend: Backend,
    /// Base seed for source selection.
    #[serde(default)]
    pub seed: u32,
}

/// One `(word_lengths, source_count)` pair of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Word-length range.
    pub word_lengths: WordLengths,
    /// Recordings per stored document.
    pub source_count: usize,
}

impl RunSettings {
    /// Stable key used to derive the run's random stream.
    pub fn key(&self) -> String {
        format!("words={}/sources={}", self.word_lengths, self.source_count)
    }
}

impl EvaluationConfig {
    /// A configuration with every default and the given algorithms.
    pub fn new(algorithms: Vec<Algorithm>) -> Self {
        Self {
            algorithms,
            duration_secs: default_duration_secs(),
            word_lengths: default_word_lengths(),
            source_counts: default_source_counts(),
            cutoffs: default_cutoffs(),
            rounds: default_rounds(),
            combination_mode: CombinationMode::default(),
            query_strategy: QueryStrategy::default(),
            backend: Backend::default(),
            seed: 0,
        }
    }

    /// Parses and validates a configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithms);
        }
        let mut seen = HashSet::new();
        for algorithm in &self.algorithms {
            if !seen.insert(*algorithm) {
                return Err(ConfigError::DuplicateAlgorithm(*algorithm));
            }
        }

        if self.word_lengths.is_empty() {
            return Err(ConfigError::EmptyList("word_lengths"));
        }
        if self.source_counts.is_empty() {
            return Err(ConfigError::EmptyList("source_counts"));
        }
        if self.cutoffs.is_empty() {
            return Err(ConfigError::EmptyList("cutoffs"));
        }
        if self.cutoffs.contains(&0) {
            return Err(ConfigError::ZeroCutoff);
        }
        if self.source_counts.contains(&0) {
            return Err(ConfigError::ZeroSourceCount);
        }
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }

    /// Every `(word_lengths, source_count)` pair, word lengths outermost.
    pub fn runs(&self) -> Vec<RunSettings> {
        self.word_lengths
            .iter()
            .flat_map(|w| {
                self.source_counts.iter().map(move |k| RunSettings {
                    word_lengths: *w,
                    source_count: *k,
                })
            })
            .collect()
    }

    /// Largest configured cutoff, the number of hits to request.
    pub fn max_cutoff(&self) -> usize {
        self.cutoffs.iter().copied().max().unwrap_or(0)
    }
}
