//! Retrieval collaborator contract.
//!
//! The evaluator stores one combined document per work, refreshes, then runs
//! queries and only checks whether the right work shows up in a prefix of the
//! ranked hits. Ranking itself is up to the collaborator.

use claraprint_core::Fingerprint;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// A combined document stored for one work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Work the document represents.
    pub work_id: String,
    /// Recordings the document was built from.
    pub source_ids: Vec<String>,
    /// Combined shingle tokens.
    pub tokens: Vec<String>,
    /// Raw fingerprints the tokens came from, grouped per source recording
    /// in algorithm order.
    pub fingerprints: Vec<Fingerprint>,
}

/// A search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Shingle tokens of the query recording.
    pub tokens: Vec<String>,
    /// Raw fingerprints of the query recording, one per algorithm.
    pub fingerprints: Vec<Fingerprint>,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Work of the matched document.
    pub work_id: String,
    /// Recordings the matched document was built from.
    pub source_ids: Vec<String>,
    /// Collaborator-specific relevance, higher is better.
    pub score: f64,
}

/// An index the evaluator can store documents in and query.
///
/// Implementations own their index exclusively for one evaluation run.
pub trait Retrieval {
    /// Short name recorded in reports.
    fn name(&self) -> &'static str;

    /// Drops every stored document.
    fn reset(&mut self) -> Result<(), RetrievalError>;

    /// Ingests one document. It may stay invisible until [`Retrieval::refresh`].
    fn store(&mut self, document: Document) -> Result<(), RetrievalError>;

    /// Makes every document stored so far visible to searches.
    fn refresh(&mut self) -> Result<(), RetrievalError>;

    /// Returns at most `limit` hits, best first.
    fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>, RetrievalError>;
}

/// Rejects documents no index could key.
pub(crate) fn check_document(document: &Document) -> Result<(), RetrievalError> {
    if document.work_id.is_empty() {
        return Err(RetrievalError::InvalidDocument(
            "work id must not be empty".to_string(),
        ));
    }
    Ok(())
}
