//! Match evaluation: top-K hit rates of combined fingerprints.
//!
//! For each `(word_lengths, source_count)` run and each round, the evaluator
//! stores one combined document per work built from randomly chosen source
//! recordings, then queries with the recordings that were not used as
//! sources and checks whether the right work appears within each cutoff.

use std::time::Instant;

use claraprint_core::combine::{combine_all, select_sources, Source};
use claraprint_core::{Algorithm, CombinationMode, Fingerprint, WordLengths};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{EvaluationConfig, QueryStrategy, RunSettings};
use crate::dataset::Dataset;
use crate::error::{EvalError, RetrievalError};
use crate::retrieval::{Document, Query, Retrieval};
use crate::rng::{create_round_rng, derive_run_seed};
use crate::stats::{CutoffSummary, RoundAccumulator, RoundScores};

/// Results of one `(word_lengths, source_count)` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationReport {
    /// Word-length range.
    pub word_lengths: WordLengths,
    /// Recordings combined per document.
    pub source_count: usize,
    /// Works with enough recordings to be indexed.
    pub indexed_works: usize,
    /// Works skipped for having fewer recordings than `source_count`.
    pub skipped_works: usize,
    /// Per-round scores.
    pub rounds: Vec<RoundScores>,
    /// Per-cutoff hit-rate summaries across rounds.
    pub cutoffs: Vec<CutoffSummary>,
    /// Mean time to store one document, in seconds.
    pub mean_store_secs: f64,
    /// Mean time to run one query, in seconds.
    pub mean_search_secs: f64,
}

/// Results of a whole configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Version of the crate that produced the report.
    pub version: String,
    /// Retrieval collaborator name.
    pub backend: String,
    /// Algorithms combined per recording.
    pub algorithms: Vec<Algorithm>,
    /// Excerpt duration read from the dataset.
    pub duration_secs: u32,
    /// Token merge policy.
    pub combination_mode: CombinationMode,
    /// Query selection policy.
    pub query_strategy: QueryStrategy,
    /// Base seed.
    pub seed: u32,
    /// One entry per run, in [`EvaluationConfig::runs`] order.
    pub configurations: Vec<ConfigurationReport>,
}

/// A recording with every configured fingerprint present.
struct Candidate<'a> {
    recording_id: &'a str,
    fingerprints: Vec<&'a Fingerprint>,
}

impl<'a> Candidate<'a> {
    fn source(&self) -> Source<'a> {
        Source {
            id: self.recording_id,
            fingerprints: self.fingerprints.iter().map(|f| f.as_str()).collect(),
        }
    }

    fn owned_fingerprints(&self) -> Vec<Fingerprint> {
        self.fingerprints.iter().map(|f| (*f).clone()).collect()
    }
}

struct EligibleWork<'a> {
    work_id: &'a str,
    candidates: Vec<Candidate<'a>>,
}

/// Runs evaluations of one configuration over one dataset.
pub struct Evaluator<'a> {
    dataset: &'a Dataset,
    config: &'a EvaluationConfig,
}

impl<'a> Evaluator<'a> {
    /// Validates `config` and prepares an evaluator.
    pub fn new(dataset: &'a Dataset, config: &'a EvaluationConfig) -> Result<Self, EvalError> {
        config.validate()?;
        Ok(Self { dataset, config })
    }

    /// Runs every configured `(word_lengths, source_count)` pair.
    pub fn run(&self, retrieval: &mut dyn Retrieval) -> Result<EvaluationReport, EvalError> {
        let mut configurations = Vec::new();
        for run in self.config.runs() {
            configurations.push(self.run_configuration(run, retrieval)?);
        }

        Ok(EvaluationReport {
            version: crate::VERSION.to_string(),
            backend: retrieval.name().to_string(),
            algorithms: self.config.algorithms.clone(),
            duration_secs: self.config.duration_secs,
            combination_mode: self.config.combination_mode,
            query_strategy: self.config.query_strategy,
            seed: self.config.seed,
            configurations,
        })
    }

    /// Runs every round of one `(word_lengths, source_count)` pair.
    pub fn run_configuration(
        &self,
        run: RunSettings,
        retrieval: &mut dyn Retrieval,
    ) -> Result<ConfigurationReport, EvalError> {
        let (works, skipped_works) = self.eligible_works(run.source_count);
        if skipped_works > 0 {
            warn!(
                skipped = skipped_works,
                source_count = run.source_count,
                "works with too few recordings were skipped"
            );
        }

        let run_seed = derive_run_seed(self.config.seed, &run.key());
        let mut accumulator = RoundAccumulator::new();
        for round in 0..self.config.rounds {
            let mut rng = create_round_rng(run_seed, round);
            let scores = self.run_round(&works, run, round, &mut rng, retrieval)?;
            accumulator.push(scores);
        }

        let cutoffs = accumulator.summarize(&self.config.cutoffs);
        let (mean_store_secs, mean_search_secs) = accumulator.mean_timings();
        for summary in &cutoffs {
            info!(
                words = %run.word_lengths,
                sources = run.source_count,
                cutoff = summary.cutoff,
                mean = summary.hit_rate.mean,
                std = summary.hit_rate.std,
                "configuration finished"
            );
        }

        Ok(ConfigurationReport {
            word_lengths: run.word_lengths,
            source_count: run.source_count,
            indexed_works: works.len(),
            skipped_works,
            rounds: accumulator.into_rounds(),
            cutoffs,
            mean_store_secs,
            mean_search_secs,
        })
    }

    fn eligible_works(&self, source_count: usize) -> (Vec<EligibleWork<'a>>, usize) {
        let mut eligible = Vec::new();
        let mut skipped = 0;
        let dataset: &'a Dataset = self.dataset;
        for work in &dataset.works {
            let candidates: Vec<Candidate<'a>> = work
                .recordings
                .iter()
                .filter_map(|r| {
                    r.fingerprints_for(self.config.duration_secs, &self.config.algorithms)
                        .map(|fingerprints| Candidate {
                            recording_id: &r.recording_id,
                            fingerprints,
                        })
                })
                .collect();

            if candidates.len() < source_count {
                debug!(work = %work.work_id, recordings = candidates.len(), "skipping work");
                skipped += 1;
                continue;
            }
            eligible.push(EligibleWork {
                work_id: &work.work_id,
                candidates,
            });
        }
        (eligible, skipped)
    }

    fn run_round(
        &self,
        works: &[EligibleWork<'_>],
        run: RunSettings,
        round: u32,
        rng: &mut Pcg32,
        retrieval: &mut dyn Retrieval,
    ) -> Result<RoundScores, EvalError> {
        let mode = self.config.combination_mode;
        let retrieval_err = |source: RetrievalError| EvalError::Retrieval { round, source };

        retrieval.reset().map_err(retrieval_err)?;

        let mut picks = Vec::with_capacity(works.len());
        let mut store_secs = 0.0;
        for work in works {
            let picked = select_sources(work.candidates.len(), run.source_count, rng)?;
            let sources: Vec<Source<'_>> = picked.iter().map(|&i| work.candidates[i].source()).collect();
            let source_refs: Vec<&Source<'_>> = sources.iter().collect();
            let combined = combine_all(&source_refs, run.word_lengths, mode);

            let document = Document {
                work_id: work.work_id.to_string(),
                source_ids: combined.source_ids,
                tokens: combined.tokens,
                fingerprints: picked
                    .iter()
                    .flat_map(|&i| work.candidates[i].owned_fingerprints())
                    .collect(),
            };
            debug!(work = %document.work_id, tokens = document.tokens.len(), "storing document");

            let started = Instant::now();
            retrieval.store(document).map_err(retrieval_err)?;
            store_secs += started.elapsed().as_secs_f64();
            picks.push(picked);
        }
        retrieval.refresh().map_err(retrieval_err)?;

        let limit = self.config.max_cutoff();
        let mut hits = vec![0usize; self.config.cutoffs.len()];
        let mut queries = 0usize;
        let mut search_secs = 0.0;
        for (work, picked) in works.iter().zip(&picks) {
            let remaining: Vec<&Candidate<'_>> = work
                .candidates
                .iter()
                .enumerate()
                .filter(|(i, _)| !picked.contains(i))
                .map(|(_, c)| c)
                .collect();

            let selected: Vec<&Candidate<'_>> = match self.config.query_strategy {
                QueryStrategy::EachRecording => remaining,
                QueryStrategy::OnePerWork if remaining.is_empty() => Vec::new(),
                QueryStrategy::OnePerWork => vec![remaining[rng.gen_range(0..remaining.len())]],
            };

            for candidate in selected {
                let source = candidate.source();
                let query = Query {
                    tokens: combine_all(&[&source], run.word_lengths, mode).tokens,
                    fingerprints: candidate.owned_fingerprints(),
                };

                let started = Instant::now();
                let results = retrieval.search(&query, limit).map_err(retrieval_err)?;
                search_secs += started.elapsed().as_secs_f64();

                let rank = results.iter().position(|h| h.work_id == work.work_id);
                for (slot, cutoff) in hits.iter_mut().zip(&self.config.cutoffs) {
                    if matches!(rank, Some(r) if r < *cutoff) {
                        *slot += 1;
                    }
                }
                queries += 1;
            }
        }

        if queries == 0 {
            warn!(round, "round evaluated no queries");
        }
        debug!(round, queries, "query batch finished");

        let per_cutoff: Vec<(usize, usize)> = self
            .config
            .cutoffs
            .iter()
            .copied()
            .zip(hits)
            .collect();
        let mut scores = RoundScores::new(round, works.len(), queries, &per_cutoff);
        scores.mean_store_secs = mean(store_secs, works.len());
        scores.mean_search_secs = mean(search_secs, queries);
        info!(round, queries, documents = works.len(), "round finished");
        Ok(scores)
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
