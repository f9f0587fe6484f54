//! Error types for fingerprint encoding, shingling and combination.

use thiserror::Error;

use crate::alphabet::TransitionCode;

/// Common trait for claraprint errors.
///
/// Gives every error in the workspace a stable code and a category so callers
/// (the CLI in particular) can report failures programmatically.
///
/// # Example
///
/// ```
/// use claraprint_core::error::{ClaraprintError, EncodeError};
///
/// let err = EncodeError::UnknownSymbol("H".to_string());
/// assert_eq!(err.code(), "ENCODE_001");
/// assert_eq!(err.category(), "encode");
/// ```
pub trait ClaraprintError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "ENCODE_001" or "EVAL_002". These codes
    /// are stable and can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

/// Errors raised while turning canonical symbols into a fingerprint.
///
/// Both variants indicate a mismatch between the scale and the alphabet or
/// the symbols fed to the encoder, never a data quality problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A symbol is not a position on the transition scale.
    #[error("symbol '{0}' is not on the transition scale")]
    UnknownSymbol(String),

    /// The alphabet has no letter for a transition.
    #[error("alphabet '{alphabet}' has no letter for transition {code}")]
    UnknownTransition {
        /// Name of the alphabet that was consulted.
        alphabet: &'static str,
        /// The transition that could not be mapped.
        code: TransitionCode,
    },
}

impl ClaraprintError for EncodeError {
    fn code(&self) -> &'static str {
        match self {
            EncodeError::UnknownSymbol(_) => "ENCODE_001",
            EncodeError::UnknownTransition { .. } => "ENCODE_002",
        }
    }

    fn category(&self) -> &'static str {
        "encode"
    }
}

/// Errors raised for an invalid word-length range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShingleError {
    /// Word length zero was requested.
    #[error("word lengths must be at least 1")]
    ZeroLength,

    /// The lower bound is above the upper bound.
    #[error("word length range {min}..={max} is empty")]
    EmptyRange {
        /// Requested shortest word.
        min: usize,
        /// Requested longest word.
        max: usize,
    },
}

impl ClaraprintError for ShingleError {
    fn code(&self) -> &'static str {
        match self {
            ShingleError::ZeroLength => "SHINGLE_001",
            ShingleError::EmptyRange { .. } => "SHINGLE_002",
        }
    }

    fn category(&self) -> &'static str {
        "shingle"
    }
}

/// Errors raised while selecting and combining sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    /// A source count of zero was requested.
    #[error("source count must be at least 1")]
    ZeroSources,

    /// More sources were requested than are available.
    #[error("requested {requested} source(s) but only {available} available")]
    NotEnoughSources {
        /// Number of sources requested.
        requested: usize,
        /// Number of sources available.
        available: usize,
    },
}

impl ClaraprintError for CombineError {
    fn code(&self) -> &'static str {
        match self {
            CombineError::ZeroSources => "COMBINE_001",
            CombineError::NotEnoughSources { .. } => "COMBINE_002",
        }
    }

    fn category(&self) -> &'static str {
        "combine"
    }
}

/// Errors raised for extraction-algorithm names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    /// The algorithm name is not registered.
    #[error("unsupported extraction algorithm: {0}")]
    Unsupported(String),

    /// The alphabet name is not registered.
    #[error("unsupported alphabet: {0}")]
    UnsupportedAlphabet(String),
}

impl ClaraprintError for AlgorithmError {
    fn code(&self) -> &'static str {
        match self {
            AlgorithmError::Unsupported(_) => "ALGO_001",
            AlgorithmError::UnsupportedAlphabet(_) => "ALGO_002",
        }
    }

    fn category(&self) -> &'static str {
        "algorithm"
    }
}

/// Errors raised by the annotation-to-fingerprint pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The annotation kind does not match the algorithm family.
    #[error("{algorithm} expects a {expected} annotation, got {actual}")]
    AnnotationMismatch {
        /// Algorithm requested.
        algorithm: String,
        /// Annotation kind the algorithm consumes.
        expected: &'static str,
        /// Annotation kind supplied.
        actual: &'static str,
    },

    /// An encoding option is out of range.
    #[error("invalid option {option}: {reason}")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ClaraprintError for PipelineError {
    fn code(&self) -> &'static str {
        match self {
            PipelineError::AnnotationMismatch { .. } => "PIPELINE_001",
            PipelineError::InvalidOption { .. } => "PIPELINE_002",
            PipelineError::Encode(e) => e.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            PipelineError::AnnotationMismatch { .. } | PipelineError::InvalidOption { .. } => {
                "pipeline"
            }
            PipelineError::Encode(e) => e.category(),
        }
    }
}
