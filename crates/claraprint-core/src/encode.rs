//! Transition encoding.
//!
//! A fingerprint records how each canonical symbol moves relative to the one
//! before it on a circular scale, never the absolute symbols. Two recordings
//! of the same work in different keys therefore share a fingerprint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, Direction, TransitionCode};
use crate::error::EncodeError;
use crate::normalize::SymbolSequence;

/// Circular scale of pitch positions, sharps only.
pub const SCALE: [&str; 14] = [
    "A", "A#", "B", "B#", "C", "C#", "D", "D#", "E", "E#", "F", "F#", "G", "G#",
];

/// Raw step count from which a transition goes the other way round the
/// circle instead.
pub const SWITCH_DIRECTION: usize = SCALE.len() / 2 + 1;

/// An encoded fingerprint string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps an already encoded string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True for the empty fingerprint (fewer than two symbols were encoded).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the fingerprint.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Position of `symbol` on [`SCALE`].
///
/// # Errors
/// Returns [`EncodeError::UnknownSymbol`] for anything not on the scale.
pub fn scale_index(symbol: &str) -> Result<usize, EncodeError> {
    SCALE
        .iter()
        .position(|s| *s == symbol)
        .ok_or_else(|| EncodeError::UnknownSymbol(symbol.to_string()))
}

/// Transition between two scale positions, taking the shorter way round.
///
/// Returns `None` when both positions are equal.
///
/// # Examples
/// ```
/// use claraprint_core::alphabet::{Direction, TransitionCode};
/// use claraprint_core::encode::transition;
///
/// // C (4) to G (12) is eight steps up, i.e. six steps down
/// assert_eq!(transition(4, 12), Some(TransitionCode::new(Direction::Down, 6)));
/// assert_eq!(transition(4, 11), Some(TransitionCode::new(Direction::Up, 7)));
/// ```
pub fn transition(previous: usize, current: usize) -> Option<TransitionCode> {
    if previous == current {
        return None;
    }

    let diff = previous.abs_diff(current);
    let direction = if current > previous {
        Direction::Up
    } else {
        Direction::Down
    };

    let (direction, steps) = if diff >= SWITCH_DIRECTION {
        (direction.flipped(), SCALE.len() - diff)
    } else {
        (direction, diff)
    };
    // steps <= SCALE.len() / 2 here
    Some(TransitionCode::new(direction, steps as u8))
}

/// Encodes a symbol sequence into a fingerprint.
///
/// The first symbol contributes no letter; every following symbol contributes
/// the alphabet letter(s) of its transition from the previous one. Sequences
/// of zero or one symbol encode to the empty fingerprint.
///
/// # Errors
/// Fails when a symbol is not on [`SCALE`] or the alphabet lacks a letter.
///
/// # Examples
/// ```
/// use claraprint_core::alphabet::CHORD_ALPHABET;
/// use claraprint_core::encode::encode;
/// use claraprint_core::normalize::SymbolSequence;
///
/// let symbols: SymbolSequence = ["C", "G", "C"].into_iter().collect();
/// let fp = encode(&symbols, &CHORD_ALPHABET).unwrap();
/// assert_eq!(fp.as_str(), "fm");
/// ```
pub fn encode(symbols: &SymbolSequence, alphabet: &Alphabet) -> Result<Fingerprint, EncodeError> {
    let indices = symbols
        .iter()
        .map(scale_index)
        .collect::<Result<Vec<_>, _>>()?;

    let mut encoded = String::with_capacity(indices.len().saturating_sub(1));
    for pair in indices.windows(2) {
        // Collapsed sequences never repeat a symbol, and scale entries are
        // distinct, so neighbouring indices differ.
        if let Some(code) = transition(pair[0], pair[1]) {
            encoded.push_str(alphabet.letter(code)?);
        }
    }
    Ok(Fingerprint(encoded))
}
