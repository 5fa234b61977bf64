/// Search-path errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no retrieval strategy available: vector backend unavailable and BM25 disabled")]
    NoStrategyAvailable,

    #[error("vector backend failed: {reason}")]
    VectorBackend { reason: String },

    #[error("vector backend timed out after {timeout_ms}ms")]
    VectorTimeout { timeout_ms: u64 },
}
