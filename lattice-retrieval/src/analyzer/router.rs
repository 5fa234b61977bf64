//! Strategy routing: which signals to run, and at what weights.

use tracing::debug;

use lattice_core::config::{FusionWeights, SearchConfig};
use lattice_core::models::{QueryAnalysis, QueryType};

/// The retrieval plan for one query. A disabled signal's retrieval step is
/// skipped entirely, not merely weighted to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStrategy {
    pub use_bm25: bool,
    pub use_vector: bool,
    pub weights: FusionWeights,
}

impl SearchStrategy {
    /// The configured default: vector always, BM25 when hybrid is on.
    fn default_hybrid(config: &SearchConfig) -> Self {
        Self {
            use_bm25: config.enable_bm25 && config.use_hybrid_by_default,
            use_vector: true,
            weights: config.weights,
        }
    }

    fn bm25_only() -> Self {
        Self {
            use_bm25: true,
            use_vector: false,
            weights: FusionWeights {
                vector: 0.0,
                bm25: 1.0,
            },
        }
    }

    fn vector_only() -> Self {
        Self {
            use_bm25: false,
            use_vector: true,
            weights: FusionWeights {
                vector: 1.0,
                bm25: 0.0,
            },
        }
    }
}

/// Map a query analysis onto a strategy.
///
/// Keyword queries lean on BM25 (exclusively, when the classification is
/// confident); semantic queries lean on the vector signal; mixed or
/// low-confidence classifications keep the configured default weights
/// unmodified. Without an analysis (router disabled) the default applies.
pub fn route(
    analysis: Option<&QueryAnalysis>,
    config: &SearchConfig,
    confidence_threshold: f64,
) -> SearchStrategy {
    let Some(analysis) = analysis else {
        return SearchStrategy::default_hybrid(config);
    };

    let confident = analysis.confidence >= confidence_threshold;
    let strategy = match analysis.query_type {
        QueryType::Keyword if !config.enable_bm25 => SearchStrategy::vector_only(),
        QueryType::Keyword if confident => SearchStrategy::bm25_only(),
        QueryType::Keyword => SearchStrategy {
            use_bm25: true,
            use_vector: true,
            weights: FusionWeights {
                vector: 0.3,
                bm25: 0.7,
            },
        },
        QueryType::Semantic if confident || !config.enable_bm25 => SearchStrategy::vector_only(),
        QueryType::Semantic => SearchStrategy {
            use_bm25: true,
            use_vector: true,
            weights: FusionWeights {
                vector: 0.7,
                bm25: 0.3,
            },
        },
        QueryType::Mixed => SearchStrategy::default_hybrid(config),
    };

    debug!(
        query_type = ?analysis.query_type,
        confidence = analysis.confidence,
        use_bm25 = strategy.use_bm25,
        use_vector = strategy.use_vector,
        "routed query"
    );
    strategy
}
