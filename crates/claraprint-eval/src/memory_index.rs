//! In-process inverted index.

use std::collections::HashMap;

use tracing::debug;

use crate::error::RetrievalError;
use crate::retrieval::{check_document, Document, Hit, Query, Retrieval};

#[derive(Debug, Clone)]
struct Entry {
    work_id: String,
    source_ids: Vec<String>,
    term_counts: HashMap<String, u64>,
}

/// Inverted index over document tokens.
///
/// Documents become searchable after [`Retrieval::refresh`]. A document
/// scores the sum, over distinct query tokens, of query term frequency times
/// document term frequency. Ties keep ingestion order and documents sharing
/// no token are not returned.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    entries: Vec<Entry>,
    pending: Vec<Entry>,
    postings: HashMap<String, Vec<(usize, u64)>>,
}

impl MemoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of searchable documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is searchable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of documents stored but not yet refreshed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

fn term_counts<'a>(tokens: impl IntoIterator<Item = &'a String>) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

impl Retrieval for MemoryIndex {
    fn name(&self) -> &'static str {
        "memory_index"
    }

    fn reset(&mut self) -> Result<(), RetrievalError> {
        self.entries.clear();
        self.pending.clear();
        self.postings.clear();
        Ok(())
    }

    fn store(&mut self, document: Document) -> Result<(), RetrievalError> {
        check_document(&document)?;
        let term_counts = term_counts(&document.tokens);
        self.pending.push(Entry {
            work_id: document.work_id,
            source_ids: document.source_ids,
            term_counts,
        });
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), RetrievalError> {
        for entry in self.pending.drain(..) {
            let id = self.entries.len();
            for (term, count) in &entry.term_counts {
                self.postings.entry(term.clone()).or_default().push((id, *count));
            }
            self.entries.push(entry);
        }
        debug!(documents = self.entries.len(), "refreshed memory index");
        Ok(())
    }

    fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>, RetrievalError> {
        let mut scores = vec![0u64; self.entries.len()];
        for (term, query_count) in term_counts(&query.tokens) {
            if let Some(postings) = self.postings.get(&term) {
                for (id, doc_count) in postings {
                    scores[*id] += query_count * doc_count;
                }
            }
        }

        let mut ranked: Vec<(usize, u64)> = scores
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > 0)
            .collect();
        // stable: equal scores keep ingestion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);

        Ok(ranked
            .into_iter()
            .map(|(id, score)| {
                let entry = &self.entries[id];
                Hit {
                    work_id: entry.work_id.clone(),
                    source_ids: entry.source_ids.clone(),
                    score: score as f64,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(work_id: &str, tokens: &[&str]) -> Document {
        Document {
            work_id: work_id.to_string(),
            source_ids: vec![format!("{}-rec", work_id)],
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            fingerprints: Vec::new(),
        }
    }

    fn query(tokens: &[&str]) -> Query {
        Query {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            fingerprints: Vec::new(),
        }
    }

    fn work_ids(hits: &[Hit]) -> Vec<&str> {
        hits.iter().map(|h| h.work_id.as_str()).collect()
    }

    #[test]
    fn test_documents_invisible_until_refresh() {
        let mut index = MemoryIndex::new();
        index.store(doc("w1", &["ab", "bc"])).unwrap();
        assert!(index.search(&query(&["ab"]), 10).unwrap().is_empty());
        assert_eq!(index.pending(), 1);

        index.refresh().unwrap();
        assert_eq!(work_ids(&index.search(&query(&["ab"]), 10).unwrap()), ["w1"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_repeated_tokens_weigh_more() {
        let mut index = MemoryIndex::new();
        index.store(doc("once", &["ab", "cd"])).unwrap();
        index.store(doc("twice", &["ab", "ab"])).unwrap();
        index.refresh().unwrap();

        let hits = index.search(&query(&["ab"]), 10).unwrap();
        assert_eq!(work_ids(&hits), ["twice", "once"]);
        assert_eq!(hits[0].score, 2.0);
        assert_eq!(hits[0].source_ids, ["twice-rec"]);
    }

    #[test]
    fn test_ties_keep_ingestion_order_and_limit() {
        let mut index = MemoryIndex::new();
        for id in ["w1", "w2", "w3"] {
            index.store(doc(id, &["xy"])).unwrap();
        }
        index.store(doc("w4", &["zz"])).unwrap();
        index.refresh().unwrap();

        assert_eq!(work_ids(&index.search(&query(&["xy"]), 10).unwrap()), ["w1", "w2", "w3"]);
        assert_eq!(work_ids(&index.search(&query(&["xy"]), 2).unwrap()), ["w1", "w2"]);
        assert!(index.search(&query(&["xy"]), 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let mut index = MemoryIndex::new();
        index.store(doc("w1", &["ab"])).unwrap();
        index.refresh().unwrap();
        assert!(index.search(&query(&[]), 10).unwrap().is_empty());
    }

    #[test]
    fn test_reset_drops_everything() {
        let mut index = MemoryIndex::new();
        index.store(doc("w1", &["ab"])).unwrap();
        index.refresh().unwrap();
        index.store(doc("w2", &["ab"])).unwrap();
        index.reset().unwrap();
        index.refresh().unwrap();
        assert!(index.is_empty());
        assert!(index.search(&query(&["ab"]), 10).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_document_without_work_id() {
        let mut index = MemoryIndex::new();
        let err = index.store(doc("", &["ab"])).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidDocument(_)));
    }
}
