use async_trait::async_trait;

use crate::errors::LatticeResult;
use crate::models::{RecordKind, VectorHit};

/// Semantic-similarity backend (network or database round-trip).
///
/// Absence of a provider is a first-class state: the engine holds an
/// `Option` of this capability and degrades to BM25-only when it is `None`
/// or when a call fails.
#[async_trait]
pub trait IVectorSearchProvider: Send + Sync {
    /// Return up to `limit` (id, similarity) pairs for the query, most
    /// similar first. Embedding generation happens behind this seam.
    async fn search(
        &self,
        query: &str,
        kind: RecordKind,
        limit: usize,
    ) -> LatticeResult<Vec<VectorHit>>;
}
