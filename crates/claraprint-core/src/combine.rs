//! Combining fingerprints from several sources.
//!
//! A source is one recording, carrying one fingerprint per extraction
//! algorithm. Selected sources are shingled, their words concatenated, and
//! the result reduced according to a [`CombinationMode`].

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CombineError;
use crate::shingle::{dedup_preserving_order, shingle, WordLengths};

/// How the concatenated words of several sources are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    /// Keep every word, duplicates included, so recurring words weigh more.
    #[default]
    Union,
    /// Keep each distinct word once.
    Intersection,
}

impl CombinationMode {
    /// Name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            CombinationMode::Union => "union",
            CombinationMode::Intersection => "intersection",
        }
    }
}

impl fmt::Display for CombinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombinationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(CombinationMode::Union),
            "intersection" => Ok(CombinationMode::Intersection),
            other => Err(format!("unknown combination mode: {}", other)),
        }
    }
}

/// One recording offered to the combiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source<'a> {
    /// Opaque recording identifier.
    pub id: &'a str,
    /// One fingerprint per extraction algorithm, in algorithm order.
    pub fingerprints: Vec<&'a str>,
}

impl<'a> Source<'a> {
    /// A source with a single fingerprint.
    pub fn single(id: &'a str, fingerprint: &'a str) -> Self {
        Self {
            id,
            fingerprints: vec![fingerprint],
        }
    }
}

/// Output of [`combine`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Combined {
    /// Combined token sequence.
    pub tokens: Vec<String>,
    /// Identifiers of the sources that were used, in selection order.
    pub source_ids: Vec<String>,
}

/// Picks `k` distinct indices out of `available`, uniformly at random.
///
/// # Errors
/// Fails when `k` is zero or larger than `available`.
pub fn select_sources<R: Rng + ?Sized>(
    available: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, CombineError> {
    if k == 0 {
        return Err(CombineError::ZeroSources);
    }
    if k > available {
        return Err(CombineError::NotEnoughSources {
            requested: k,
            available,
        });
    }
    Ok(rand::seq::index::sample(rng, available, k).into_vec())
}

/// Concatenates per-source token lists and applies `mode`.
pub fn merge_tokens<I>(token_lists: I, mode: CombinationMode) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let tokens: Vec<String> = token_lists.into_iter().flatten().collect();
    match mode {
        CombinationMode::Union => tokens,
        CombinationMode::Intersection => dedup_preserving_order(tokens),
    }
}

/// Shingles every fingerprint of every given source and merges the words.
///
/// Fingerprints of different algorithms are concatenated like additional
/// sources, not weighted separately.
pub fn combine_all(sources: &[&Source<'_>], lengths: WordLengths, mode: CombinationMode) -> Combined {
    let tokens = merge_tokens(
        sources
            .iter()
            .flat_map(|s| s.fingerprints.iter().map(|fp| shingle(fp, lengths))),
        mode,
    );
    Combined {
        tokens,
        source_ids: sources.iter().map(|s| s.id.to_string()).collect(),
    }
}

/// Selects `k` of `sources` at random and combines them.
///
/// # Errors
/// Fails when `k` is zero or larger than `sources.len()`.
///
/// # Examples
/// ```
/// use claraprint_core::combine::{combine, CombinationMode, Source};
/// use claraprint_core::shingle::WordLengths;
/// use rand::SeedableRng;
///
/// let sources = vec![Source::single("rec-1", "abab"), Source::single("rec-2", "abba")];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let lengths = WordLengths::new(2, 2).unwrap();
///
/// let all = combine(&sources, 2, lengths, CombinationMode::Union, &mut rng).unwrap();
/// assert_eq!(all.tokens.len(), 6);
/// assert_eq!(all.source_ids.len(), 2);
/// ```
pub fn combine<R: Rng + ?Sized>(
    sources: &[Source<'_>],
    k: usize,
    lengths: WordLengths,
    mode: CombinationMode,
    rng: &mut R,
) -> Result<Combined, CombineError> {
    let picked: Vec<&Source<'_>> = select_sources(sources.len(), k, rng)?
        .into_iter()
        .map(|i| &sources[i])
        .collect();
    Ok(combine_all(&picked, lengths, mode))
}
