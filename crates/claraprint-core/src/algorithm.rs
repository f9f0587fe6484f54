//! Registry of supported extraction algorithms.
//!
//! Each algorithm names an external chord or melody extractor. The registry
//! decides which normalizer, alphabet and run-length filter its annotations
//! go through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::AlphabetKind;
use crate::error::AlgorithmError;

/// Whether an algorithm produces chord labels or pitch estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmFamily {
    /// Timed chord labels.
    Chords,
    /// Frame-wise pitch estimates in Hz.
    Melody,
}

impl AlgorithmFamily {
    /// Lower-case family name, also the algorithm-name prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmFamily::Chords => "chords",
            AlgorithmFamily::Melody => "melody",
        }
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named chord or melody extraction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Chordino (NNLS chroma) chord estimation.
    ChordsChordino,
    /// CREMA chord estimation.
    ChordsCrema,
    /// Melodia predominant melody extraction.
    MelodyMelodia,
    /// Piptrack pitch tracking.
    MelodyPiptrack,
}

impl Algorithm {
    /// Every registered algorithm.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::ChordsChordino,
        Algorithm::ChordsCrema,
        Algorithm::MelodyMelodia,
        Algorithm::MelodyPiptrack,
    ];

    /// Canonical name, e.g. `chords_chordino`.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::ChordsChordino => "chords_chordino",
            Algorithm::ChordsCrema => "chords_crema",
            Algorithm::MelodyMelodia => "melody_melodia",
            Algorithm::MelodyPiptrack => "melody_piptrack",
        }
    }

    /// Family of the algorithm.
    pub fn family(self) -> AlgorithmFamily {
        match self {
            Algorithm::ChordsChordino | Algorithm::ChordsCrema => AlgorithmFamily::Chords,
            Algorithm::MelodyMelodia | Algorithm::MelodyPiptrack => AlgorithmFamily::Melody,
        }
    }

    /// Alphabet used when the caller does not pick one.
    pub fn default_alphabet(self) -> AlphabetKind {
        match self.family() {
            AlgorithmFamily::Chords => AlphabetKind::Chord,
            AlgorithmFamily::Melody => AlphabetKind::Melody,
        }
    }

    /// Run-length threshold for melody normalization, `None` for chords.
    ///
    /// Melodia output is smoother than piptrack, so it needs a longer run
    /// before a pitch class counts as a note.
    pub fn default_min_count(self) -> Option<usize> {
        match self {
            Algorithm::MelodyMelodia => Some(10),
            Algorithm::MelodyPiptrack => Some(5),
            Algorithm::ChordsChordino | Algorithm::ChordsCrema => None,
        }
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AlgorithmError::Unsupported(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
