//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints exactly one [`JsonOutput`] document
//! to stdout, whether it succeeded or not.

use std::fmt;
use std::process::ExitCode;

use anyhow::{Context, Result};
use claraprint_core::error::{
    AlgorithmError, ClaraprintError, CombineError, EncodeError, PipelineError, ShingleError,
};
use claraprint_eval::error::{ConfigError, DatasetError, EvalError, RetrievalError};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Library failures carry the library's own code instead (e.g. "PIPELINE_001").
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Invalid command-line argument
    pub const INVALID_ARGUMENT: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_004";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_005";
    /// Evaluation failed
    pub const EVALUATION: &str = "CLI_006";
}

/// Context attached to a failure the CLI itself can name.
///
/// Added with [`anyhow::Context`]; [`JsonError::from_anyhow`] reports its code
/// and suggestion ahead of any library code further down the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFailure {
    /// One of [`error_codes`].
    pub code: &'static str,
    /// Message shown in front of the underlying error.
    pub message: String,
    /// Hint for fixing the input.
    pub suggestion: Option<String>,
}

impl CliFailure {
    /// Creates a failure with code and message.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for CliFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "ENCODE_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            suggestion: None,
        }
    }

    /// Builds an error from an `anyhow` chain.
    ///
    /// A [`CliFailure`] context decides the code and suggestion; otherwise the
    /// first library error found in the chain does, then `fallback_code`.
    pub fn from_anyhow(err: &anyhow::Error, fallback_code: &str) -> Self {
        let message = format!("{:#}", err);
        if let Some(failure) = err.downcast_ref::<CliFailure>() {
            let error = Self::new(failure.code, message);
            return match &failure.suggestion {
                Some(suggestion) => error.with_suggestion(suggestion.as_str()),
                None => error,
            };
        }
        let code = library_code(err).unwrap_or(fallback_code);
        Self::new(code, message)
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

fn library_code(err: &anyhow::Error) -> Option<&'static str> {
    fn code_of<E: ClaraprintError + 'static>(
        cause: &(dyn std::error::Error + 'static),
    ) -> Option<&'static str> {
        cause.downcast_ref::<E>().map(|e| e.code())
    }

    err.chain().find_map(|cause| {
        code_of::<PipelineError>(cause)
            .or_else(|| code_of::<EncodeError>(cause))
            .or_else(|| code_of::<AlgorithmError>(cause))
            .or_else(|| code_of::<ShingleError>(cause))
            .or_else(|| code_of::<CombineError>(cause))
            .or_else(|| code_of::<DatasetError>(cause))
            .or_else(|| code_of::<ConfigError>(cause))
            .or_else(|| code_of::<EvalError>(cause))
            .or_else(|| code_of::<RetrievalError>(cause))
    })
}

/// Envelope printed by every `--json` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> JsonOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Prints the outcome of a command as a [`JsonOutput`] and maps it to an
/// exit code.
pub fn emit<T: Serialize>(
    outcome: Result<T>,
    fallback_code: &str,
    file: Option<&str>,
) -> Result<ExitCode> {
    let (output, code) = match outcome {
        Ok(result) => (JsonOutput::success(result), ExitCode::SUCCESS),
        Err(e) => {
            let mut error = JsonError::from_anyhow(&e, fallback_code);
            if let Some(file) = file {
                error = error.with_file(file);
            }
            (JsonOutput::failure(vec![error]), ExitCode::from(1))
        }
    };
    println!("{}", to_json(&output)?);
    Ok(code)
}

/// Pretty-prints `value`, tagging a failure with [`error_codes::JSON_SERIALIZE`].
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .context(CliFailure::new(error_codes::JSON_SERIALIZE, "Failed to serialize JSON"))
}
