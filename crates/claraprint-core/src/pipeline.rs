//! Annotation to fingerprint pipeline.
//!
//! Glues the normalizers and the encoder together for one recording and one
//! extraction algorithm.

use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, AlgorithmFamily};
use crate::alphabet::AlphabetKind;
use crate::encode::{encode, Fingerprint};
use crate::error::PipelineError;
use crate::normalize::{normalize_chords, normalize_melody, ChordCleaning, ChordEvent, SymbolSequence};

/// Raw extractor output for one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// Timed chord labels.
    Chords {
        /// Chord events in time order.
        events: Vec<ChordEvent>,
    },
    /// Frame-wise pitch estimates in Hz; non-positive values are unvoiced.
    Melody {
        /// Pitch estimates in frame order.
        frequencies: Vec<f64>,
    },
}

impl Annotation {
    /// The family of extractors that produce this kind of annotation.
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Annotation::Chords { .. } => AlgorithmFamily::Chords,
            Annotation::Melody { .. } => AlgorithmFamily::Melody,
        }
    }
}

/// Overrides for [`fingerprint`]. The defaults follow the algorithm registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintOptions {
    /// Chord cleaning settings.
    pub chords: ChordCleaning,
    /// Melody run-length threshold; `None` uses the algorithm default.
    pub min_count: Option<usize>,
    /// Alphabet; `None` uses the algorithm default.
    pub alphabet: Option<AlphabetKind>,
}

impl FingerprintOptions {
    /// Checks that every override is in range.
    ///
    /// # Errors
    /// Fails on a negative or NaN chord duration threshold and on a zero
    /// melody run length.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let threshold = self.chords.duration_threshold_ms;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(PipelineError::InvalidOption {
                option: "duration_threshold_ms",
                reason: format!("must be a non-negative number, got {}", threshold),
            });
        }
        if self.min_count == Some(0) {
            return Err(PipelineError::InvalidOption {
                option: "min_count",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Output of [`fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The canonical symbols the fingerprint was built from.
    pub symbols: SymbolSequence,
    /// The fingerprint.
    pub fingerprint: Fingerprint,
}

/// Normalizes `annotation` and encodes it for `algorithm`.
///
/// # Errors
/// Fails when `options` are out of range, when the annotation kind does not
/// match the algorithm family, or when encoding fails.
///
/// # Examples
/// ```
/// use claraprint_core::algorithm::Algorithm;
/// use claraprint_core::normalize::ChordEvent;
/// use claraprint_core::pipeline::{fingerprint, Annotation, FingerprintOptions};
///
/// let annotation = Annotation::Chords {
///     events: vec![
///         ChordEvent::new(0.0, "C"),
///         ChordEvent::new(1.0, "G"),
///         ChordEvent::new(2.0, "C"),
///     ],
/// };
/// let out = fingerprint(&annotation, Algorithm::ChordsChordino, &FingerprintOptions::default())
///     .unwrap();
/// assert_eq!(out.fingerprint.as_str(), "fm");
/// ```
pub fn fingerprint(
    annotation: &Annotation,
    algorithm: Algorithm,
    options: &FingerprintOptions,
) -> Result<Encoded, PipelineError> {
    options.validate()?;
    let symbols = match (annotation, algorithm.family()) {
        (Annotation::Chords { events }, AlgorithmFamily::Chords) => {
            normalize_chords(events, &options.chords)
        }
        (Annotation::Melody { frequencies }, AlgorithmFamily::Melody) => {
            let min_count = options
                .min_count
                .or_else(|| algorithm.default_min_count())
                .unwrap_or(1);
            normalize_melody(frequencies, min_count)
        }
        (other, family) => {
            return Err(PipelineError::AnnotationMismatch {
                algorithm: algorithm.to_string(),
                expected: family.as_str(),
                actual: other.family().as_str(),
            })
        }
    };

    let alphabet = options
        .alphabet
        .unwrap_or_else(|| algorithm.default_alphabet())
        .alphabet();
    let fingerprint = encode(&symbols, alphabet)?;
    Ok(Encoded {
        symbols,
        fingerprint,
    })
}
