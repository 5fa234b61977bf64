use serde::{Deserialize, Serialize};

/// Read-only snapshot of a BM25 index, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub term_count: usize,
    pub avg_doc_length: f64,
}

/// One cache entry as reported by [`CacheStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntryStats {
    pub key: String,
    pub document_count: usize,
    /// Seconds since the entry was built.
    pub age_secs: i64,
}

/// Snapshot of the index cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub entries: Vec<CacheEntryStats>,
}
