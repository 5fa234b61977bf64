use serde::{Deserialize, Serialize};

/// The shape a query was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Short, proper-noun-heavy, few function words. BM25 territory.
    Keyword,
    /// Natural-language phrasing, questions, descriptive structure.
    Semantic,
    /// Signals for both, or nothing decisive.
    Mixed,
}

/// Classifier output. Created fresh per query; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub query_type: QueryType,
    /// How strongly the heuristics support the classification, in [0, 1].
    pub confidence: f64,
    /// Candidate BM25-friendly tokens, in query order.
    pub keywords: Vec<String>,
    /// Tokens that look like named entities, in query order.
    pub entities: Vec<String>,
    /// Which heuristics fired, for operators and debuggers. Not consumed
    /// programmatically.
    pub reasons: Vec<String>,
}

impl QueryAnalysis {
    /// Analysis of an empty query: nothing to go on.
    pub fn empty() -> Self {
        Self {
            query_type: QueryType::Semantic,
            confidence: 0.0,
            keywords: Vec::new(),
            entities: Vec::new(),
            reasons: vec!["empty query".to_string()],
        }
    }
}
