//! Index-free retrieval by direct fingerprint comparison.

use claraprint_core::ScoreKind;

use crate::error::RetrievalError;
use crate::retrieval::{check_document, Document, Hit, Query, Retrieval};

/// Ranks documents by the best [`ScoreKind`] value between a query
/// fingerprint and a document fingerprint of the same algorithm.
///
/// Document fingerprints are read in per-source groups as long as the query's
/// fingerprint list, so position `i` of every group is compared with query
/// fingerprint `i` only. Documents without fingerprints are never returned. Equal scores keep
/// ingestion order.
#[derive(Debug, Clone)]
pub struct PairwiseIndex {
    scorer: ScoreKind,
    documents: Vec<Document>,
    pending: Vec<Document>,
}

impl PairwiseIndex {
    /// Creates an empty index scoring with `scorer`.
    pub fn new(scorer: ScoreKind) -> Self {
        Self {
            scorer,
            documents: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// The similarity function in use.
    pub fn scorer(&self) -> ScoreKind {
        self.scorer
    }

    fn best_score(&self, query: &Query, document: &Document) -> Option<f64> {
        let per_source = query.fingerprints.len();
        if per_source == 0 {
            return None;
        }
        document
            .fingerprints
            .chunks(per_source)
            .flat_map(|group| {
                query
                    .fingerprints
                    .iter()
                    .zip(group)
                    .map(|(q, d)| self.scorer.score(q.as_str(), d.as_str()))
            })
            .reduce(f64::max)
    }
}

impl Retrieval for PairwiseIndex {
    fn name(&self) -> &'static str {
        "pairwise"
    }

    fn reset(&mut self) -> Result<(), RetrievalError> {
        self.documents.clear();
        self.pending.clear();
        Ok(())
    }

    fn store(&mut self, document: Document) -> Result<(), RetrievalError> {
        check_document(&document)?;
        self.pending.push(document);
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), RetrievalError> {
        self.documents.append(&mut self.pending);
        Ok(())
    }

    fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>, RetrievalError> {
        let mut ranked: Vec<(usize, f64)> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(i, d)| self.best_score(query, d).map(|s| (i, s)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);

        Ok(ranked
            .into_iter()
            .map(|(i, score)| Hit {
                work_id: self.documents[i].work_id.clone(),
                source_ids: self.documents[i].source_ids.clone(),
                score,
            })
            .collect())
    }
}
