//! Error types for datasets, retrieval collaborators, configuration and
//! evaluation runs.

use std::path::PathBuf;

use claraprint_core::error::{ClaraprintError, CombineError, PipelineError};
use claraprint_core::Algorithm;
use thiserror::Error;

/// Errors raised while reading, writing or building a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A file could not be read or written.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid JSON for the expected shape.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An annotation could not be fingerprinted.
    #[error("failed to fingerprint '{path}': {source}")]
    Fingerprint {
        /// Annotation file.
        path: PathBuf,
        /// Pipeline error.
        #[source]
        source: PipelineError,
    },

    /// The manifest's encoding options are out of range.
    #[error("invalid manifest options: {0}")]
    Options(#[source] PipelineError),

    /// Two works share an identifier.
    #[error("duplicate work id '{0}'")]
    DuplicateWork(String),

    /// Two recordings share an identifier.
    #[error("duplicate recording id '{0}'")]
    DuplicateRecording(String),

    /// A recording has two excerpts for the same duration and algorithm.
    #[error("recording '{recording_id}' has more than one {algorithm} excerpt of {duration_secs}s")]
    DuplicateExcerpt {
        /// Recording identifier.
        recording_id: String,
        /// Extraction algorithm.
        algorithm: Algorithm,
        /// Excerpt duration.
        duration_secs: u32,
    },
}

impl ClaraprintError for DatasetError {
    fn code(&self) -> &'static str {
        match self {
            DatasetError::Io { .. } => "DATASET_001",
            DatasetError::Parse { .. } => "DATASET_002",
            DatasetError::Fingerprint { .. } => "DATASET_003",
            DatasetError::DuplicateWork(_) => "DATASET_004",
            DatasetError::DuplicateRecording(_) => "DATASET_005",
            DatasetError::DuplicateExcerpt { .. } => "DATASET_006",
            DatasetError::Options(_) => "DATASET_007",
        }
    }

    fn category(&self) -> &'static str {
        "dataset"
    }
}

/// Errors raised by a retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    /// The collaborator could not be reached.
    #[error("retrieval backend unavailable: {0}")]
    Unavailable(String),

    /// The collaborator refused a document.
    #[error("document rejected: {0}")]
    InvalidDocument(String),
}

impl ClaraprintError for RetrievalError {
    fn code(&self) -> &'static str {
        match self {
            RetrievalError::Unavailable(_) => "RETRIEVAL_001",
            RetrievalError::InvalidDocument(_) => "RETRIEVAL_002",
        }
    }

    fn category(&self) -> &'static str {
        "retrieval"
    }
}

/// Errors raised while loading or validating an evaluation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for [`crate::EvaluationConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// No algorithm was configured.
    #[error("at least one algorithm is required")]
    NoAlgorithms,

    /// The same algorithm was listed twice.
    #[error("algorithm '{0}' is listed more than once")]
    DuplicateAlgorithm(Algorithm),

    /// A list field is empty.
    #[error("'{0}' must not be empty")]
    EmptyList(&'static str),

    /// A cutoff of zero was configured.
    #[error("cutoffs must be at least 1")]
    ZeroCutoff,

    /// A source count of zero was configured.
    #[error("source counts must be at least 1")]
    ZeroSourceCount,

    /// Zero rounds were configured.
    #[error("rounds must be at least 1")]
    ZeroRounds,
}

impl ClaraprintError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_001",
            ConfigError::Parse(_) => "CONFIG_002",
            ConfigError::NoAlgorithms => "CONFIG_003",
            ConfigError::DuplicateAlgorithm(_) => "CONFIG_004",
            ConfigError::EmptyList(_) => "CONFIG_005",
            ConfigError::ZeroCutoff => "CONFIG_006",
            ConfigError::ZeroSourceCount => "CONFIG_007",
            ConfigError::ZeroRounds => "CONFIG_008",
        }
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// Errors that abort an evaluation run.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The retrieval collaborator failed during a round.
    #[error("round {round}: {source}")]
    Retrieval {
        /// Zero-based round index.
        round: u32,
        /// Collaborator error.
        #[source]
        source: RetrievalError,
    },

    /// Source selection failed.
    #[error(transparent)]
    Combine(#[from] CombineError),
}

impl ClaraprintError for EvalError {
    fn code(&self) -> &'static str {
        match self {
            EvalError::Config(e) => e.code(),
            EvalError::Retrieval { source, .. } => source.code(),
            EvalError::Combine(e) => e.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            EvalError::Config(e) => e.category(),
            EvalError::Retrieval { .. } => "retrieval",
            EvalError::Combine(e) => e.category(),
        }
    }
}
