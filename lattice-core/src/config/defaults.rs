//! Named defaults referenced by the config structs.

/// BM25 term-frequency saturation.
pub const DEFAULT_BM25_K1: f64 = 1.5;

/// BM25 length-normalization strength (0 = none, 1 = full).
pub const DEFAULT_BM25_B: f64 = 0.75;

/// Topic documents are long; a higher k1 lets term frequency keep paying off.
pub const DEFAULT_TOPIC_K1: f64 = 2.0;

/// Default fusion weight for the vector signal.
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.6;

/// Default fusion weight for the BM25 signal.
pub const DEFAULT_BM25_WEIGHT: f64 = 0.4;

/// Vector backend deadline before the engine degrades to BM25-only.
pub const DEFAULT_VECTOR_TIMEOUT_MS: u64 = 10_000;

/// Maximum number of cached indexes.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10;

/// Cached index time-to-live (30 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1_800;

/// Router confidence above which a keyword query goes BM25-only.
pub const DEFAULT_ROUTER_CONFIDENCE_THRESHOLD: f64 = 0.7;
