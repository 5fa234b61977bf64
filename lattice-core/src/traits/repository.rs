use async_trait::async_trait;

use crate::errors::LatticeResult;
use crate::models::{GraphRecord, RecordKind, SearchFilters};

/// Source of knowledge-graph records. Scope filters (organization, type,
/// category) restrict the returned corpus; date ranges are evaluated by the
/// engine afterwards.
#[async_trait]
pub trait IGraphRepository: Send + Sync {
    async fn fetch_records(
        &self,
        kind: RecordKind,
        filters: &SearchFilters,
    ) -> LatticeResult<Vec<GraphRecord>>;
}
