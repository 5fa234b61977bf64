use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Per-signal fusion weights. Need not sum to 1; a zero weight disables the
/// signal's retrieval step entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub vector: f64,
    pub bm25: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            vector: defaults::DEFAULT_VECTOR_WEIGHT,
            bm25: defaults::DEFAULT_BM25_WEIGHT,
        }
    }
}

impl FusionWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vector < 0.0 {
            return Err(ConfigError::NegativeWeight {
                signal: "vector",
                value: self.vector,
            });
        }
        if self.bm25 < 0.0 {
            return Err(ConfigError::NegativeWeight {
                signal: "bm25",
                value: self.bm25,
            });
        }
        Ok(())
    }
}

/// Feature configuration persisted externally and read at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub enable_bm25: bool,
    pub enable_router: bool,
    pub use_hybrid_by_default: bool,
    pub weights: FusionWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_bm25: true,
            enable_router: true,
            use_hybrid_by_default: true,
            weights: FusionWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Safe fallback when the config store cannot be read: every optional
    /// strategy off, so the search path degrades instead of crashing.
    pub fn conservative() -> Self {
        Self {
            enable_bm25: false,
            enable_router: false,
            use_hybrid_by_default: false,
            weights: FusionWeights::default(),
        }
    }
}
