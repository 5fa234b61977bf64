/// Lattice system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of results returned by a search.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Over-fetch multiplier applied before post-filtering trims results.
pub const CANDIDATE_OVERFETCH: usize = 2;

/// Number of record kinds searched per query (entity, relation, topic).
pub const RECORD_KIND_COUNT: usize = 3;

/// Maximum characters of topic content folded into searchable text.
pub const TOPIC_CONTENT_PREVIEW_CHARS: usize = 500;
