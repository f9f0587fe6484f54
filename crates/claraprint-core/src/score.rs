//! Pairwise similarity between fingerprints.
//!
//! Every score here is higher-is-better and symmetric in its arguments.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shingle::{shingle_distinct, WordLengths};

/// Unit-cost insert/delete/substitute distance over characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Edit distance turned into a similarity: `max(len(a), len(b)) - distance`.
///
/// Identical fingerprints score their own length.
///
/// # Examples
/// ```
/// use claraprint_core::score::edit_score;
///
/// assert_eq!(edit_score("abcd", "abcd"), 4);
/// assert_eq!(edit_score("abcd", "abed"), 3);
/// ```
pub fn edit_score(a: &str, b: &str) -> usize {
    let longest = a.chars().count().max(b.chars().count());
    // Levenshtein distance never exceeds the longer length.
    longest - edit_distance(a, b)
}

fn word_set(fingerprint: &str) -> HashSet<String> {
    shingle_distinct(fingerprint, WordLengths::SCORING)
        .into_iter()
        .collect()
}

/// Number of distinct 2- to 6-letter words the fingerprints share.
///
/// # Examples
/// ```
/// use claraprint_core::score::common_words;
///
/// // shared: "ab", "bc", "abc"
/// assert_eq!(common_words("abcx", "yabc"), 3);
/// ```
pub fn common_words(a: &str, b: &str) -> usize {
    let words_a = word_set(a);
    let words_b = word_set(b);
    words_a.intersection(&words_b).count()
}

/// [`common_words`] scaled by `min(|words_a|, |words_b|) / max(...)`.
///
/// Penalizes pairs whose fingerprints differ a lot in length. Defined as 0
/// when either side has no words.
pub fn weighted_common_words(a: &str, b: &str) -> f64 {
    let words_a = word_set(a);
    let words_b = word_set(b);

    let smaller = words_a.len().min(words_b.len());
    let larger = words_a.len().max(words_b.len());
    if smaller == 0 {
        return 0.0;
    }

    let common = words_a.intersection(&words_b).count();
    common as f64 * (smaller as f64 / larger as f64)
}

/// Selector for one of the similarity functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// [`edit_score`]
    Edit,
    /// [`common_words`]
    CommonWords,
    /// [`weighted_common_words`]
    WeightedCommonWords,
}

impl ScoreKind {
    /// Every similarity function.
    pub const ALL: [ScoreKind; 3] = [
        ScoreKind::Edit,
        ScoreKind::CommonWords,
        ScoreKind::WeightedCommonWords,
    ];

    /// Scores a pair of fingerprints.
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            ScoreKind::Edit => edit_score(a, b) as f64,
            ScoreKind::CommonWords => common_words(a, b) as f64,
            ScoreKind::WeightedCommonWords => weighted_common_words(a, b),
        }
    }

    /// Name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreKind::Edit => "edit",
            ScoreKind::CommonWords => "common_words",
            ScoreKind::WeightedCommonWords => "weighted_common_words",
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        ScoreKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| format!("unknown metric: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_score_self_is_length() {
        for fp in ["a", "fm", "hijklmn", "abcabcabc"] {
            assert_eq!(edit_score(fp, fp), fp.len());
        }
    }

    #[test]
    fn test_edit_score_is_symmetric() {
        assert_eq!(edit_score("kitten", "sitting"), edit_score("sitting", "kitten"));
        // distance 3, longest 7
        assert_eq!(edit_score("kitten", "sitting"), 4);
    }

    #[test]
    fn test_edit_score_empty() {
        assert_eq!(edit_score("", ""), 0);
        assert_eq!(edit_score("", "abc"), 0);
    }

    #[test]
    fn test_common_words_counts_distinct_matches() {
        // "aaaa": aa, aaa, aaaa  /  "aaa": aa, aaa
        assert_eq!(common_words("aaaa", "aaa"), 2);
        assert_eq!(common_words("aaa", "aaaa"), 2);
    }

    #[test]
    fn test_common_words_ignores_words_longer_than_six() {
        let a = "abcdefgh";
        // 7 + 6 + 5 + 4 + 3 distinct words of length 2..=6
        assert_eq!(common_words(a, a), 25);
    }

    #[test]
    fn test_weighted_common_words() {
        // "abc": ab, bc, abc (3)  /  "abcd": ab, bc, cd, abc, bcd, abcd (6)
        let w = weighted_common_words("abc", "abcd");
        assert!((w - 3.0 * 0.5).abs() < 1e-12);
        assert_eq!(w, weighted_common_words("abcd", "abc"));
    }

    #[test]
    fn test_weighted_common_words_empty_side_is_zero() {
        assert_eq!(weighted_common_words("", "abcd"), 0.0);
        assert_eq!(weighted_common_words("a", "a"), 0.0);
    }

    #[test]
    fn test_score_kind_dispatch_and_parse() {
        assert_eq!(ScoreKind::Edit.score("ab", "ab"), 2.0);
        assert_eq!(ScoreKind::CommonWords.score("abc", "abc"), 3.0);
        assert_eq!("common-words".parse::<ScoreKind>().unwrap(), ScoreKind::CommonWords);
        assert_eq!(
            "weighted_common_words".parse::<ScoreKind>().unwrap(),
            ScoreKind::WeightedCommonWords
        );
        assert!("cosine".parse::<ScoreKind>().is_err());
    }
}
