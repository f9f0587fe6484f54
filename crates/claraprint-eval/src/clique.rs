//! Similarity inside work groups ("cliques").
//!
//! Measures how alike the recordings of one work are under a similarity
//! function, without any index involved.

use claraprint_core::{Algorithm, ScoreKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::stats::Summary;

/// Mean pairwise similarity of the recordings of one work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSimilarity {
    /// Work identifier.
    pub work_id: String,
    /// Unordered recording pairs scored.
    pub pairs: usize,
    /// Mean score over those pairs.
    pub mean_score: f64,
}

/// Clique similarity across a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliqueReport {
    /// Algorithm whose fingerprints were compared.
    pub algorithm: Algorithm,
    /// Excerpt duration.
    pub duration_secs: u32,
    /// Similarity function.
    pub metric: ScoreKind,
    /// Works with at least two fingerprints.
    pub works: Vec<WorkSimilarity>,
    /// Works skipped for having fewer than two fingerprints.
    pub skipped_works: usize,
    /// Summary of the per-work means.
    pub summary: Summary,
}

/// Scores every unordered pair of recordings inside each work.
pub fn clique_similarity(
    dataset: &Dataset,
    algorithm: Algorithm,
    duration_secs: u32,
    metric: ScoreKind,
) -> CliqueReport {
    let mut works = Vec::new();
    let mut skipped_works = 0;

    for work in &dataset.works {
        let fingerprints: Vec<&str> = work
            .recordings
            .iter()
            .filter_map(|r| r.fingerprint(duration_secs, algorithm))
            .map(|f| f.as_str())
            .collect();
        if fingerprints.len() < 2 {
            skipped_works += 1;
            continue;
        }

        let mut total = 0.0;
        let mut pairs = 0;
        for (i, a) in fingerprints.iter().enumerate() {
            for b in &fingerprints[i + 1..] {
                total += metric.score(a, b);
                pairs += 1;
            }
        }
        let mean_score = total / pairs as f64;
        debug!(work = %work.work_id, pairs, mean_score, "scored clique");
        works.push(WorkSimilarity {
            work_id: work.work_id.clone(),
            pairs,
            mean_score,
        });
    }

    let means: Vec<f64> = works.iter().map(|w| w.mean_score).collect();
    CliqueReport {
        algorithm,
        duration_secs,
        metric,
        works,
        skipped_works,
        summary: Summary::from_values(&means),
    }
}
