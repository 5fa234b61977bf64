//! SearchEngine: orchestrates the full hybrid pipeline.
//!
//! query → validate filters → load config → classify/route →
//! per-kind fan-out (BM25 ∥ vector, joined before fusion) →
//! fuse → date-filter → merge kinds → rank → respond.
//!
//! The vector call is I/O and runs under a timeout; on failure the engine
//! degrades to BM25-only instead of failing the query. The whole search is
//! a future: dropping it cancels the in-flight vector call, and no partial
//! state touches the shared cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use lattice_core::config::{FusionWeights, RetrievalConfig, SearchConfig};
use lattice_core::constants::{CANDIDATE_OVERFETCH, RECORD_KIND_COUNT};
use lattice_core::errors::{LatticeError, LatticeResult, SearchError};
use lattice_core::models::{
    GraphRecord, HybridSearchResult, RecordKind, SearchFilters, SearchResponse, SearchResult,
    VectorHit,
};
use lattice_core::traits::{
    IClock, IConfigStore, IGraphRepository, IQueryClassifier, IVectorSearchProvider, SystemClock,
};

use crate::analyzer::{route, HeuristicClassifier, SearchStrategy};
use crate::cache::{scores_are_valid, IndexCache};
use crate::fusion;
use crate::index::Bm25Index;

/// Per-kind search outcome, before the kinds are merged.
struct KindOutcome {
    results: Vec<HybridSearchResult>,
    degraded: bool,
    bm25_used: bool,
    vector_used: bool,
}

impl KindOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            degraded: false,
            bm25_used: false,
            vector_used: false,
        }
    }
}

/// The hybrid retrieval engine. Owns the index cache; collaborators are
/// injected at construction and never loaded late.
pub struct SearchEngine {
    repository: Arc<dyn IGraphRepository>,
    vector: Option<Arc<dyn IVectorSearchProvider>>,
    config_store: Arc<dyn IConfigStore>,
    classifier: Box<dyn IQueryClassifier>,
    cache: IndexCache,
    config: RetrievalConfig,
}

impl SearchEngine {
    pub fn new(
        repository: Arc<dyn IGraphRepository>,
        vector: Option<Arc<dyn IVectorSearchProvider>>,
        config_store: Arc<dyn IConfigStore>,
        config: RetrievalConfig,
    ) -> Self {
        Self::with_clock(repository, vector, config_store, config, Arc::new(SystemClock))
    }

    /// Construct with an explicit clock (tests drive TTL expiry manually).
    pub fn with_clock(
        repository: Arc<dyn IGraphRepository>,
        vector: Option<Arc<dyn IVectorSearchProvider>>,
        config_store: Arc<dyn IConfigStore>,
        config: RetrievalConfig,
        clock: Arc<dyn IClock>,
    ) -> Self {
        let cache = IndexCache::new(config.cache_max_entries, config.cache_ttl_secs, clock);
        Self {
            repository,
            vector,
            config_store,
            classifier: Box::new(HeuristicClassifier::new()),
            cache,
            config,
        }
    }

    /// Swap in an alternative query classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn IQueryClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Search the knowledge graph. Entities, relations, and topics are
    /// searched concurrently and merged into one ranked list.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        filters: &SearchFilters,
    ) -> LatticeResult<SearchResponse> {
        filters.validate()?;

        let query = query.trim();
        if query.is_empty() {
            debug!("empty query");
            return Ok(SearchResponse::empty());
        }

        let search_config = self.load_config();
        search_config.weights.validate()?;

        let analysis = search_config
            .enable_router
            .then(|| self.classifier.classify(query));
        let mut strategy = route(
            analysis.as_ref(),
            &search_config,
            self.config.router_confidence_threshold,
        );

        // Capability-absent vector backend: BM25-only is the defined
        // fallback. With BM25 also off there is nothing left to run.
        if strategy.use_vector && self.vector.is_none() {
            if !search_config.enable_bm25 {
                return Err(SearchError::NoStrategyAvailable.into());
            }
            debug!("vector capability absent, running BM25-only");
            strategy = SearchStrategy {
                use_bm25: true,
                use_vector: false,
                weights: FusionWeights {
                    vector: 0.0,
                    bm25: 1.0,
                },
            };
        }

        let per_kind_limit = limit.div_ceil(RECORD_KIND_COUNT).max(1);
        let (entities, relations, topics) = tokio::join!(
            self.search_kind(RecordKind::Entity, query, per_kind_limit, filters, strategy),
            self.search_kind(RecordKind::Relation, query, per_kind_limit, filters, strategy),
            self.search_kind(RecordKind::Topic, query, per_kind_limit, filters, strategy),
        );

        let mut response = SearchResponse::empty();
        response.analysis = analysis;
        for outcome in [entities, relations, topics] {
            let outcome = match outcome {
                Ok(outcome) => outcome,
                // Strategy exhaustion fails the whole query; a single
                // kind's repository failure only loses that kind.
                Err(err @ LatticeError::Search(_)) => return Err(err),
                Err(err) => {
                    warn!(error = %err, "kind search failed, continuing without it");
                    KindOutcome::empty()
                }
            };
            response.results.extend(outcome.results);
            response.degraded |= outcome.degraded;
            response.bm25_used |= outcome.bm25_used;
            response.vector_used |= outcome.vector_used;
        }

        response.results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        response.results.truncate(limit);

        info!(
            results = response.results.len(),
            degraded = response.degraded,
            bm25 = response.bm25_used,
            vector = response.vector_used,
            "search complete"
        );
        Ok(response)
    }

    /// Cache statistics, for operators.
    pub fn cache_stats(&self) -> lattice_core::models::CacheStats {
        self.cache.stats()
    }

    /// Invalidate cached indexes for one record kind. Call after mutating
    /// that kind's records.
    pub fn invalidate_kind(&self, kind: RecordKind) {
        self.cache.invalidate_kind(kind);
    }

    /// Invalidate every cached index.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    fn load_config(&self) -> SearchConfig {
        match self.config_store.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "config load failed, using conservative defaults");
                SearchConfig::conservative()
            }
        }
    }

    /// Search one record kind: fetch the scoped corpus, run BM25 against
    /// the cached index and the vector call concurrently, then fuse.
    async fn search_kind(
        &self,
        kind: RecordKind,
        query: &str,
        limit: usize,
        filters: &SearchFilters,
        strategy: SearchStrategy,
    ) -> LatticeResult<KindOutcome> {
        let records = self.repository.fetch_records(kind, filters).await?;
        if records.is_empty() {
            debug!(kind = kind.as_str(), "empty corpus");
            return Ok(KindOutcome::empty());
        }
        let by_id: HashMap<&str, &GraphRecord> =
            records.iter().map(|r| (r.id.as_str(), r)).collect();

        let fetch_limit = limit * CANDIDATE_OVERFETCH;
        let cache_key = self.cache_key(kind, filters);

        let vector_task = self.vector_candidates(kind, query, fetch_limit, strategy);
        let bm25_task = self.bm25_candidates(kind, query, fetch_limit, &cache_key, &records, strategy);
        let ((vector_hits, degraded), bm25_results) = tokio::join!(vector_task, bm25_task);
        let bm25_results = bm25_results?;

        // Vector gone and BM25 not in play: nothing can serve this query.
        if degraded && !strategy.use_bm25 {
            return Err(SearchError::NoStrategyAvailable.into());
        }

        let vector_used = vector_hits.is_some();
        let bm25_used = bm25_results.is_some();
        let fused = fusion::fuse(
            kind,
            vector_hits.as_deref().unwrap_or(&[]),
            bm25_results.as_deref().unwrap_or(&[]),
            strategy.weights,
            fetch_limit,
        );

        // Candidates must belong to the fetched corpus (a vector backend
        // may return ids outside the current scope) and pass the date
        // filters.
        let mut results: Vec<HybridSearchResult> = fused
            .into_iter()
            .filter(|r| {
                by_id
                    .get(r.id.as_str())
                    .is_some_and(|record| filters.matches_dates(record))
            })
            .collect();
        results.truncate(limit);

        debug!(
            kind = kind.as_str(),
            results = results.len(),
            degraded,
            "kind search complete"
        );
        Ok(KindOutcome {
            results,
            degraded,
            bm25_used,
            vector_used,
        })
    }

    /// Run the vector signal if the strategy wants it and a provider is
    /// bound. Returns `(hits, degraded)`: failures and timeouts surface as
    /// degradation, not errors.
    async fn vector_candidates(
        &self,
        kind: RecordKind,
        query: &str,
        limit: usize,
        strategy: SearchStrategy,
    ) -> (Option<Vec<VectorHit>>, bool) {
        if !strategy.use_vector || strategy.weights.vector == 0.0 {
            return (None, false);
        }
        let Some(provider) = &self.vector else {
            return (None, false);
        };

        let timeout = Duration::from_millis(self.config.vector_timeout_ms);
        match tokio::time::timeout(timeout, provider.search(query, kind, limit)).await {
            Ok(Ok(hits)) => {
                debug!(kind = kind.as_str(), hits = hits.len(), "vector search complete");
                (Some(hits), false)
            }
            Ok(Err(err)) => {
                warn!(kind = kind.as_str(), error = %err, "vector search failed, degrading to BM25");
                (None, true)
            }
            Err(_) => {
                warn!(
                    kind = kind.as_str(),
                    timeout_ms = self.config.vector_timeout_ms,
                    "vector search timed out, degrading to BM25"
                );
                (None, true)
            }
        }
    }

    /// Run the BM25 signal if the strategy wants it, building or reusing
    /// the cached index. A cached index that serves invalid scores is
    /// invalidated and rebuilt once rather than trusted.
    async fn bm25_candidates(
        &self,
        kind: RecordKind,
        query: &str,
        limit: usize,
        cache_key: &str,
        records: &[GraphRecord],
        strategy: SearchStrategy,
    ) -> LatticeResult<Option<Vec<SearchResult>>> {
        if !strategy.use_bm25 || strategy.weights.bm25 == 0.0 {
            return Ok(None);
        }

        let entry = self
            .cache
            .get_or_build(cache_key, || async move { Ok(self.build_index(kind, records)) })
            .await?;
        let mut results = entry.index.search(query, limit);

        if !scores_are_valid(&results) {
            warn!(key = cache_key, "invalid scores from cached index, rebuilding");
            self.cache.invalidate(cache_key);
            let entry = self
                .cache
                .get_or_build(cache_key, || async move { Ok(self.build_index(kind, records)) })
                .await?;
            results = entry.index.search(query, limit);
        }

        Ok(Some(results))
    }

    fn build_index(&self, kind: RecordKind, records: &[GraphRecord]) -> Bm25Index {
        let mut index = Bm25Index::with_config(self.config.bm25_for_kind(kind));
        for record in records {
            index.add_document(&record.id, &record.searchable_text);
        }
        index
    }

    /// Cache key: record kind + fingerprint of the corpus-defining scope
    /// filters. Date ranges are post-filters and do not change the corpus.
    fn cache_key(&self, kind: RecordKind, filters: &SearchFilters) -> String {
        let fingerprint = blake3::hash(filters.scope_key().as_bytes());
        format!("{}:{}", kind.as_str(), fingerprint.to_hex())
    }
}
