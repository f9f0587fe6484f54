//! Per-round scores and their aggregation across rounds.

use serde::{Deserialize, Serialize};

/// Mean, extremes and population standard deviation of a set of values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl Summary {
    /// Summarizes `values`. An empty slice yields all zeros.
    ///
    /// # Example
    /// ```
    /// use claraprint_eval::stats::Summary;
    ///
    /// let s = Summary::from_values(&[0.5, 1.0]);
    /// assert_eq!(s.mean, 0.75);
    /// assert_eq!(s.std, 0.25);
    /// ```
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            std: variance.sqrt(),
        }
    }
}

/// Hits for one cutoff in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffHits {
    /// Top-K cutoff.
    pub cutoff: usize,
    /// Queries whose work appeared within the first `cutoff` hits.
    pub hits: usize,
    /// `hits / queries`, 0 when there were no queries.
    pub hit_rate: f64,
}

/// Outcome of one evaluation round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundScores {
    /// Zero-based round index.
    pub round: u32,
    /// Documents stored.
    pub documents: usize,
    /// Queries evaluated.
    pub queries: usize,
    /// Per-cutoff hits, in configured cutoff order.
    pub cutoffs: Vec<CutoffHits>,
    /// Mean time to store one document, in seconds.
    pub mean_store_secs: f64,
    /// Mean time to run one query, in seconds.
    pub mean_search_secs: f64,
}

impl RoundScores {
    /// Builds round scores from raw hit counts, one per cutoff.
    pub fn new(round: u32, documents: usize, queries: usize, hits: &[(usize, usize)]) -> Self {
        let cutoffs = hits
            .iter()
            .map(|&(cutoff, hits)| CutoffHits {
                cutoff,
                hits,
                hit_rate: if queries == 0 {
                    0.0
                } else {
                    hits as f64 / queries as f64
                },
            })
            .collect();
        Self {
            round,
            documents,
            queries,
            cutoffs,
            mean_store_secs: 0.0,
            mean_search_secs: 0.0,
        }
    }

    /// Hit rate for `cutoff`, if it was scored.
    pub fn hit_rate(&self, cutoff: usize) -> Option<f64> {
        self.cutoffs
            .iter()
            .find(|c| c.cutoff == cutoff)
            .map(|c| c.hit_rate)
    }
}

/// Hit-rate summary of one cutoff across rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffSummary {
    /// Top-K cutoff.
    pub cutoff: usize,
    /// Summary of the per-round hit rates.
    pub hit_rate: Summary,
}

/// Collects round scores of one run.
///
/// Accumulators of independently evaluated rounds can be merged in any
/// order; the summaries only depend on the set of rounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundAccumulator {
    rounds: Vec<RoundScores>,
}

impl RoundAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one round.
    pub fn push(&mut self, round: RoundScores) {
        self.rounds.push(round);
    }

    /// Absorbs every round of `other`.
    pub fn merge(&mut self, other: RoundAccumulator) {
        self.rounds.extend(other.rounds);
    }

    /// Number of rounds collected.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True when no round was collected.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Per-cutoff summaries across rounds, in `cutoffs` order.
    pub fn summarize(&self, cutoffs: &[usize]) -> Vec<CutoffSummary> {
        // sum in round order so merged accumulators agree to the last bit
        let mut ordered: Vec<&RoundScores> = self.rounds.iter().collect();
        ordered.sort_by_key(|r| r.round);

        cutoffs
            .iter()
            .map(|&cutoff| {
                let rates: Vec<f64> = ordered
                    .iter()
                    .filter_map(|r| r.hit_rate(cutoff))
                    .collect();
                CutoffSummary {
                    cutoff,
                    hit_rate: Summary::from_values(&rates),
                }
            })
            .collect()
    }

    /// Mean of the per-round store and search times.
    pub fn mean_timings(&self) -> (f64, f64) {
        let store: Vec<f64> = self.rounds.iter().map(|r| r.mean_store_secs).collect();
        let search: Vec<f64> = self.rounds.iter().map(|r| r.mean_search_secs).collect();
        (Summary::from_values(&store).mean, Summary::from_values(&search).mean)
    }

    /// Rounds sorted by round index.
    pub fn into_rounds(mut self) -> Vec<RoundScores> {
        self.rounds.sort_by_key(|r| r.round);
        self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round(index: u32, queries: usize, hits_at_1: usize) -> RoundScores {
        RoundScores::new(index, 4, queries, &[(5, queries), (1, hits_at_1)])
    }

    #[test]
    fn test_summary_of_constant_values() {
        let s = Summary::from_values(&[0.4, 0.4, 0.4]);
        assert!((s.mean - 0.4).abs() < 1e-12);
        assert_eq!(s.min, 0.4);
        assert_eq!(s.max, 0.4);
        assert!(s.std.abs() < 1e-12);
    }

    #[test]
    fn test_summary_population_std() {
        let s = Summary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std, 2.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::from_values(&[]), Summary::default());
    }

    #[test]
    fn test_zero_queries_rate_is_zero() {
        let r = RoundScores::new(0, 3, 0, &[(10, 0)]);
        assert_eq!(r.hit_rate(10), Some(0.0));
        assert_eq!(r.hit_rate(1), None);
    }

    #[test]
    fn test_summarize_per_cutoff() {
        let mut acc = RoundAccumulator::new();
        acc.push(round(0, 4, 1));
        acc.push(round(1, 4, 3));
        let summary = acc.summarize(&[5, 1]);
        assert_eq!(summary[0].cutoff, 5);
        assert_eq!(summary[0].hit_rate.mean, 1.0);
        assert_eq!(summary[1].hit_rate.mean, 0.5);
        assert_eq!(summary[1].hit_rate.min, 0.25);
        assert_eq!(summary[1].hit_rate.max, 0.75);
        assert_eq!(summary[1].hit_rate.std, 0.25);
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let mut left = RoundAccumulator::new();
        left.push(round(0, 4, 1));
        left.push(round(1, 4, 2));
        let mut right = RoundAccumulator::new();
        right.push(round(2, 4, 4));

        let mut a = left.clone();
        a.merge(right.clone());
        let mut b = right;
        b.merge(left);

        assert_eq!(a.summarize(&[1]), b.summarize(&[1]));
        assert_eq!(a.len(), 3);
        assert_eq!(a.into_rounds(), b.into_rounds());
    }
}
