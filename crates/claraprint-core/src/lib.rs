//! Claraprint Core - Transition Fingerprints for Cover-Song Identification
//!
//! This crate turns chord or melody annotations of a recording into a short
//! alphabetic fingerprint, splits fingerprints into overlapping words for
//! lexical retrieval, combines several fingerprints of the same work, and
//! scores pairs of fingerprints against each other.
//!
//! # Determinism
//!
//! Normalization, encoding, shingling and scoring are pure functions over
//! static tables. The only randomness is source selection in [`combine`],
//! which takes the random generator from the caller.
//!
//! # Example
//!
//! ```
//! use claraprint_core::{fingerprint, shingle, Algorithm, Annotation, ChordEvent};
//! use claraprint_core::{FingerprintOptions, WordLengths};
//!
//! let annotation = Annotation::Chords {
//!     events: vec![
//!         ChordEvent::new(0.0, "C"),
//!         ChordEvent::new(0.2, "N"),
//!         ChordEvent::new(0.5, "G"),
//!         ChordEvent::new(0.5, "N"),
//!         ChordEvent::new(0.9, "C"),
//!     ],
//! };
//!
//! let encoded = fingerprint(&annotation, Algorithm::ChordsChordino, &FingerprintOptions::default())?;
//! assert_eq!(encoded.fingerprint.as_str(), "fm");
//!
//! let words = shingle(encoded.fingerprint.as_str(), WordLengths::new(2, 3)?);
//! assert_eq!(words, ["fm"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Structure
//!
//! - [`normalize`]: chord and melody cleaning into canonical symbols
//! - [`notes`]: equal-tempered note frequency table
//! - [`alphabet`]: transition codes and the three alphabets
//! - [`encode`]: the transition encoder
//! - [`shingle`]: word splitting
//! - [`combine`]: multi-source combination
//! - [`score`]: pairwise similarity functions
//! - [`algorithm`]: extraction-algorithm registry
//! - [`pipeline`]: annotation to fingerprint glue

pub mod algorithm;
pub mod alphabet;
pub mod combine;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod notes;
pub mod pipeline;
pub mod score;
pub mod shingle;

// Re-export main types
pub use algorithm::{Algorithm, AlgorithmFamily};
pub use alphabet::{Alphabet, AlphabetKind, Direction, TransitionCode};
pub use combine::{combine, combine_all, CombinationMode, Combined, Source};
pub use encode::{encode, Fingerprint, SCALE};
pub use error::{
    AlgorithmError, ClaraprintError, CombineError, EncodeError, PipelineError, ShingleError,
};
pub use normalize::{normalize_chords, normalize_melody, ChordCleaning, ChordEvent, SymbolSequence};
pub use pipeline::{fingerprint, Annotation, Encoded, FingerprintOptions};
pub use score::{common_words, edit_score, weighted_common_words, ScoreKind};
pub use shingle::{shingle, shingle_distinct, split_in_words, WordLengths};

/// Crate version, recorded in evaluation reports.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
