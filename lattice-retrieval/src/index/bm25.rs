//! In-memory BM25 inverted index.
//!
//! score(D, Q) = Σ idf(t) · ((k1 + 1)·tf) / (tf + k1·(1 − b + b·|D|/avgdl))
//! with idf(t) = ln((N − df + 0.5)/(df + 0.5)).
//!
//! Indexes are rebuilt wholesale per corpus and searched read-only, so
//! `search` is safe to run concurrently behind an `Arc`.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use lattice_core::config::Bm25Config;
use lattice_core::models::{Document, IndexStats, SearchResult};

use crate::tokenizer::tokenize;

/// Inverted index over a corpus of documents.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    config: Bm25Config,
    /// id → original text.
    documents: HashMap<String, String>,
    /// Ids in insertion order; score ties resolve to first-seen.
    doc_order: Vec<String>,
    /// id → (term → frequency).
    term_freq: HashMap<String, HashMap<String, usize>>,
    /// term → number of documents containing it. Zero-count terms are
    /// dropped, so this is never negative and `len()` is the term count.
    doc_freq: HashMap<String, usize>,
    /// id → token count.
    doc_lengths: HashMap<String, usize>,
    avg_doc_length: f64,
}

impl Bm25Index {
    pub fn new() -> Self {
        Self::with_config(Bm25Config::default())
    }

    /// Parameters are fixed for the lifetime of the index.
    pub fn with_config(config: Bm25Config) -> Self {
        Self {
            config,
            documents: HashMap::new(),
            doc_order: Vec::new(),
            term_freq: HashMap::new(),
            doc_freq: HashMap::new(),
            doc_lengths: HashMap::new(),
            avg_doc_length: 0.0,
        }
    }

    /// Index a document. Empty or whitespace-only text is a no-op.
    /// Re-adding an existing id replaces the previous content: the old
    /// document-frequency contribution is removed first, so `doc_freq` is
    /// never double-counted.
    pub fn add_document(&mut self, id: &str, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if self.documents.contains_key(id) {
            self.remove_document(id);
        }

        let terms = tokenize(text);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for term in &terms {
            *counts.entry(term.clone()).or_insert(0) += 1;
        }
        // Once per unique term in this document, not once per occurrence.
        for term in counts.keys() {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }

        self.documents.insert(id.to_string(), text.to_string());
        self.doc_order.push(id.to_string());
        self.doc_lengths.insert(id.to_string(), terms.len());
        self.term_freq.insert(id.to_string(), counts);
        self.update_avg_doc_length();
    }

    /// Bulk add.
    pub fn add_documents(&mut self, documents: &[Document]) {
        for doc in documents {
            self.add_document(&doc.id, &doc.text);
        }
    }

    /// Remove a document and its document-frequency contribution.
    /// No-op if the id is absent.
    pub fn remove_document(&mut self, id: &str) {
        let Some(counts) = self.term_freq.remove(id) else {
            return;
        };
        for term in counts.keys() {
            let drop = match self.doc_freq.get_mut(term) {
                Some(df) => {
                    *df = df.saturating_sub(1);
                    *df == 0
                }
                None => false,
            };
            if drop {
                self.doc_freq.remove(term);
            }
        }
        self.documents.remove(id);
        self.doc_lengths.remove(id);
        self.doc_order.retain(|d| d != id);
        self.update_avg_doc_length();
    }

    /// Rank documents against the query, highest score first, truncated to
    /// `limit`. Ties keep first-seen document order.
    ///
    /// A term present in more than half the corpus has negative IDF, so an
    /// accumulated score at or below zero is possible; only exact zero
    /// (which includes no match at all) excludes a document.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let n = self.documents.len();
        let mut results: Vec<SearchResult> = Vec::new();

        for id in &self.doc_order {
            let Some(counts) = self.term_freq.get(id) else {
                continue;
            };
            let doc_length = self.doc_lengths.get(id).copied().unwrap_or(0) as f64;

            let mut score = 0.0;
            let mut matched_terms: BTreeSet<String> = BTreeSet::new();
            for term in &query_terms {
                let tf = counts.get(term).copied().unwrap_or(0);
                if tf == 0 {
                    continue;
                }
                matched_terms.insert(term.clone());

                let tf = tf as f64;
                let numerator = (self.config.k1 + 1.0) * tf;
                let denominator = tf
                    + self.config.k1
                        * (1.0 - self.config.b
                            + self.config.b * doc_length / self.avg_doc_length);
                score += self.idf(term, n) * numerator / denominator;
            }

            if score != 0.0 {
                results.push(SearchResult {
                    id: id.clone(),
                    score,
                    matched_terms,
                });
            }
        }

        // Stable sort: equal scores keep insertion order.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        debug!(
            query_terms = query_terms.len(),
            results = results.len(),
            "bm25 search complete"
        );
        results
    }

    /// Read-only snapshot for observability.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.documents.len(),
            term_count: self.doc_freq.len(),
            avg_doc_length: self.avg_doc_length,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Reset to empty. Average document length becomes 0 (not NaN) so
    /// downstream math stays defined.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.doc_order.clear();
        self.term_freq.clear();
        self.doc_freq.clear();
        self.doc_lengths.clear();
        self.avg_doc_length = 0.0;
    }

    fn idf(&self, term: &str, n: usize) -> f64 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0);
        if df == 0 || n == 0 {
            return 0.0;
        }
        ((n as f64 - df as f64 + 0.5) / (df as f64 + 0.5)).ln()
    }

    fn update_avg_doc_length(&mut self) {
        if self.documents.is_empty() {
            self.avg_doc_length = 0.0;
            return;
        }
        let total: usize = self.doc_lengths.values().sum();
        self.avg_doc_length = total as f64 / self.documents.len() as f64;
    }
}

impl Default for Bm25Index {
    fn default() -> Self {
        Self::new()
    }
}
