//! Transition alphabets.
//!
//! An alphabet maps a relative transition (direction plus number of scale
//! steps, 1 to 7) to the letter(s) written into a fingerprint. The three
//! alphabets are immutable static tables shared by every caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AlgorithmError, EncodeError};

/// Largest step count a transition can have after wraparound.
pub const MAX_STEPS: u8 = 7;

/// Direction of a transition on the circular scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards a higher scale index.
    Up,
    /// Towards a lower scale index.
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// A relative transition between two consecutive symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionCode {
    /// Direction of the move.
    pub direction: Direction,
    /// Number of scale steps moved.
    pub steps: u8,
}

impl TransitionCode {
    /// Creates a transition code.
    pub fn new(direction: Direction, steps: u8) -> Self {
        Self { direction, steps }
    }
}

impl fmt::Display for TransitionCode {
    /// Formats as "U3" / "D6".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self.direction {
            Direction::Up => 'U',
            Direction::Down => 'D',
        };
        write!(f, "{}{}", d, self.steps)
    }
}

/// A mapping from transition codes to fingerprint letters.
#[derive(Debug, PartialEq, Eq)]
pub struct Alphabet {
    name: &'static str,
    /// Letters for D1..=D7.
    down: [&'static str; MAX_STEPS as usize],
    /// Letters for U1..=U7.
    up: [&'static str; MAX_STEPS as usize],
}

impl Alphabet {
    /// Creates an alphabet covering every step count in both directions.
    pub const fn new(
        name: &'static str,
        down: [&'static str; MAX_STEPS as usize],
        up: [&'static str; MAX_STEPS as usize],
    ) -> Self {
        Self { name, down, up }
    }

    /// Name of the alphabet.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up the letter(s) for a transition.
    ///
    /// # Errors
    /// Returns [`EncodeError::UnknownTransition`] when `code.steps` is outside
    /// `1..=7`.
    pub fn letter(&self, code: TransitionCode) -> Result<&'static str, EncodeError> {
        let table = match code.direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        };
        (code.steps as usize)
            .checked_sub(1)
            .and_then(|i| table.get(i))
            .copied()
            .ok_or(EncodeError::UnknownTransition {
                alphabet: self.name,
                code,
            })
    }
}

/// Default single-letter alphabet, used for chord fingerprints.
pub static CHORD_ALPHABET: Alphabet = Alphabet::new(
    "chord",
    ["a", "b", "c", "d", "e", "f", "g"],
    ["h", "i", "j", "k", "l", "m", "n"],
);

/// Three-letter alphabet where neighbouring intervals share two letters, so a
/// chord detector confusing close chords still yields partial matches.
pub static OVERLAP_ALPHABET: Alphabet = Alphabet::new(
    "overlap",
    ["abc", "bcd", "cde", "def", "efg", "fgh", "ghi"],
    ["yza", "xyz", "wxy", "vwx", "uvw", "buv", "abu"],
);

/// Single-letter alphabet used for melody fingerprints.
///
/// D7 and U4 share the letter `y`.
pub static MELODY_ALPHABET: Alphabet = Alphabet::new(
    "melody",
    ["o", "p", "q", "r", "s", "t", "y"],
    ["b", "w", "x", "y", "z", "$", "%"],
);

/// Named selector for one of the static alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetKind {
    /// [`CHORD_ALPHABET`]
    Chord,
    /// [`OVERLAP_ALPHABET`]
    Overlap,
    /// [`MELODY_ALPHABET`]
    Melody,
}

impl AlphabetKind {
    /// Returns the static alphabet for this kind.
    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            AlphabetKind::Chord => &CHORD_ALPHABET,
            AlphabetKind::Overlap => &OVERLAP_ALPHABET,
            AlphabetKind::Melody => &MELODY_ALPHABET,
        }
    }

    /// Name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        self.alphabet().name()
    }
}

impl FromStr for AlphabetKind {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chord" => Ok(AlphabetKind::Chord),
            "overlap" => Ok(AlphabetKind::Overlap),
            "melody" => Ok(AlphabetKind::Melody),
            other => Err(AlgorithmError::UnsupportedAlphabet(other.to_string())),
        }
    }
}

impl fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
