//! Shingling: splitting fingerprints into overlapping words.
//!
//! Words are the tokens handed to a lexical retrieval engine. Windows slide
//! one character at a time and always lie fully inside the fingerprint.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShingleError;

/// An inclusive range of word lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWordLengths", into = "RawWordLengths")]
pub struct WordLengths {
    min: usize,
    max: usize,
}

#[derive(Serialize, Deserialize)]
struct RawWordLengths {
    min: usize,
    max: usize,
}

impl TryFrom<RawWordLengths> for WordLengths {
    type Error = ShingleError;

    fn try_from(raw: RawWordLengths) -> Result<Self, Self::Error> {
        WordLengths::new(raw.min, raw.max)
    }
}

impl From<WordLengths> for RawWordLengths {
    fn from(w: WordLengths) -> Self {
        RawWordLengths {
            min: w.min,
            max: w.max,
        }
    }
}

impl WordLengths {
    /// Lengths used by the common-words scores: 2 to 6 letters.
    pub const SCORING: WordLengths = WordLengths { min: 2, max: 6 };

    /// Lengths used for retrieval when nothing else is configured: 2 to 7.
    pub const RETRIEVAL: WordLengths = WordLengths { min: 2, max: 7 };

    /// Creates a validated range.
    ///
    /// # Errors
    /// Rejects `min == 0` and `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, ShingleError> {
        if min == 0 {
            return Err(ShingleError::ZeroLength);
        }
        if min > max {
            return Err(ShingleError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Shortest word length.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Longest word length.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Iterates over every length in the range.
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for WordLengths {
    fn default() -> Self {
        Self::RETRIEVAL
    }
}

impl fmt::Display for WordLengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.min, self.max)
    }
}

/// Splits `text` into every window of `len` characters, duplicates kept.
///
/// Returns nothing when `text` is shorter than `len` or `len` is zero.
///
/// # Examples
/// ```
/// use claraprint_core::shingle::split_in_words;
///
/// assert_eq!(split_in_words("abcdef", 3), ["abc", "bcd", "cde", "def"]);
/// assert!(split_in_words("ab", 3).is_empty());
/// ```
pub fn split_in_words(text: &str, len: usize) -> Vec<String> {
    if len == 0 {
        return Vec::new();
    }

    // Byte offsets of every char boundary, including the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    bounds
        .windows(len + 1)
        .map(|w| text[w[0]..w[len]].to_string())
        .collect()
}

/// Like [`split_in_words`] but keeps only the first occurrence of each word.
pub fn split_in_distinct_words(text: &str, len: usize) -> Vec<String> {
    dedup_preserving_order(split_in_words(text, len))
}

/// Shingles `text` over every length in `lengths`, duplicates kept.
///
/// Words are grouped by length, shortest first.
pub fn shingle(text: &str, lengths: WordLengths) -> Vec<String> {
    lengths
        .iter()
        .flat_map(|len| split_in_words(text, len))
        .collect()
}

/// Shingles `text` keeping distinct words within each length pass.
pub fn shingle_distinct(text: &str, lengths: WordLengths) -> Vec<String> {
    lengths
        .iter()
        .flat_map(|len| split_in_distinct_words(text, len))
        .collect()
}

/// Removes repeated tokens, keeping first occurrences in order.
pub(crate) fn dedup_preserving_order(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_covers_every_window() {
        let words: HashSet<String> = split_in_words("abcdef", 3).into_iter().collect();
        let expected: HashSet<String> = ["abc", "bcd", "cde", "def"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_split_shorter_than_length() {
        assert!(split_in_words("ab", 3).is_empty());
        assert!(split_in_words("", 1).is_empty());
        assert!(split_in_words("abc", 0).is_empty());
    }

    #[test]
    fn test_split_whole_string() {
        assert_eq!(split_in_words("abc", 3), ["abc"]);
    }

    #[test]
    fn test_split_keeps_duplicates() {
        assert_eq!(split_in_words("ababa", 2), ["ab", "ba", "ab", "ba"]);
        assert_eq!(split_in_distinct_words("ababa", 2), ["ab", "ba"]);
    }

    #[test]
    fn test_split_non_ascii_symbols() {
        assert_eq!(split_in_words("é$%", 2), ["é$", "$%"]);
    }

    #[test]
    fn test_shingle_groups_by_length() {
        let words = shingle("abcd", WordLengths::new(2, 3).unwrap());
        assert_eq!(words, ["ab", "bc", "cd", "abc", "bcd"]);
    }

    #[test]
    fn test_shingle_two_letter_fingerprint() {
        let words = shingle("fm", WordLengths::new(2, 3).unwrap());
        assert_eq!(words, ["fm"]);
    }

    #[test]
    fn test_shingle_distinct_dedups_per_pass() {
        let lengths = WordLengths::new(1, 2).unwrap();
        assert_eq!(shingle("aaa", lengths), ["a", "a", "a", "aa", "aa"]);
        assert_eq!(shingle_distinct("aaa", lengths), ["a", "aa"]);
    }

    #[test]
    fn test_word_lengths_validation() {
        assert_eq!(WordLengths::new(0, 3), Err(ShingleError::ZeroLength));
        assert_eq!(
            WordLengths::new(4, 3),
            Err(ShingleError::EmptyRange { min: 4, max: 3 })
        );
        let w = WordLengths::new(3, 3).unwrap();
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_word_lengths_serde_validates() {
        let ok: WordLengths = serde_json::from_str(r#"{"min": 2, "max": 7}"#).unwrap();
        assert_eq!(ok, WordLengths::RETRIEVAL);
        assert!(serde_json::from_str::<WordLengths>(r#"{"min": 5, "max": 2}"#).is_err());
        assert_eq!(ok.to_string(), "2_7");
    }
}
