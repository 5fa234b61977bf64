use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{QueryAnalysis, RecordKind};

/// A single BM25 match: document id, accumulated score, and the query terms
/// that matched (kept for explainability).
///
/// Scores may legitimately be negative: a term appearing in more than half
/// the corpus has negative IDF. This is expected BM25 behavior and is not
/// clamped here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub score: f64,
    pub matched_terms: BTreeSet<String>,
}

/// Which retrieval signal produced a hybrid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Bm25,
    Vector,
    Hybrid,
}

/// A hit from the vector-similarity collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    pub similarity: f64,
}

/// A fused result carrying enough identifying information for the caller to
/// hydrate the full entity/relation/topic payload from the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridSearchResult {
    pub kind: RecordKind,
    pub id: String,
    /// Combined score after per-signal normalization and weighting.
    pub score: f64,
    /// Raw similarity from the vector signal (0.0 when absent).
    pub similarity: f64,
    /// Raw BM25 score (0.0 when absent).
    pub bm25_score: f64,
    pub matched_terms: BTreeSet<String>,
    pub source: SignalSource,
}

/// Everything a query returns: the ranked list plus how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<HybridSearchResult>,
    /// True when the vector backend failed or timed out and the engine fell
    /// back to BM25-only scoring.
    pub degraded: bool,
    /// Signals that actually contributed to this response.
    pub bm25_used: bool,
    pub vector_used: bool,
    /// Present when the router classified the query.
    pub analysis: Option<QueryAnalysis>,
}

impl SearchResponse {
    /// An empty, non-degraded response (empty query, empty corpus).
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            degraded: false,
            bm25_used: false,
            vector_used: false,
            analysis: None,
        }
    }
}
