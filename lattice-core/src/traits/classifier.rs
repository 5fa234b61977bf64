use crate::models::QueryAnalysis;

/// Pluggable query-classification strategy. The default implementation is
/// heuristic pattern matching; alternatives (e.g. a trained lightweight
/// model) can be swapped in without touching the fusion engine.
pub trait IQueryClassifier: Send + Sync {
    fn classify(&self, query: &str) -> QueryAnalysis;
}
