use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::models::RecordKind;

/// BM25 scoring parameters, fixed at index-construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Length-normalization strength (0 = none, 1 = full).
    pub b: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self {
            k1: defaults::DEFAULT_BM25_K1,
            b: defaults::DEFAULT_BM25_B,
        }
    }
}

/// Engine tuning, fixed at engine construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub bm25: Bm25Config,
    /// k1 override for topic corpora (long documents).
    pub topic_k1: f64,
    pub vector_timeout_ms: u64,
    pub cache_max_entries: usize,
    pub cache_ttl_secs: u64,
    pub router_confidence_threshold: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            bm25: Bm25Config::default(),
            topic_k1: defaults::DEFAULT_TOPIC_K1,
            vector_timeout_ms: defaults::DEFAULT_VECTOR_TIMEOUT_MS,
            cache_max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            cache_ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            router_confidence_threshold: defaults::DEFAULT_ROUTER_CONFIDENCE_THRESHOLD,
        }
    }
}

impl RetrievalConfig {
    /// Parse from TOML, e.g. a `[retrieval]` table extracted from a config
    /// file.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })
    }

    /// BM25 parameters for a given record kind. Topics get the long-document
    /// k1 override.
    pub fn bm25_for_kind(&self, kind: RecordKind) -> Bm25Config {
        match kind {
            RecordKind::Topic => Bm25Config {
                k1: self.topic_k1,
                b: self.bm25.b,
            },
            _ => self.bm25,
        }
    }
}
