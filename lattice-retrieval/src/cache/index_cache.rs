//! TTL + LRU cache of built BM25 indexes.
//!
//! Entries are immutable snapshots behind `Arc`: invalidation swaps the
//! entry reference instead of mutating it, so the read path needs no lock
//! beyond the sharded map. Concurrent rebuilds for the same key are
//! serialized through a per-key build mutex; a second caller reuses the
//! build that finished while it waited.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use lattice_core::errors::LatticeResult;
use lattice_core::models::{CacheEntryStats, CacheStats, RecordKind};
use lattice_core::traits::IClock;

use crate::index::Bm25Index;

/// A built index plus its provenance. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub index: Arc<Bm25Index>,
    pub built_at: DateTime<Utc>,
    pub document_count: usize,
}

/// Cache of built indexes keyed by corpus fingerprint.
pub struct IndexCache {
    entries: DashMap<String, Arc<CacheEntry>>,
    build_locks: DashMap<String, Arc<Mutex<()>>>,
    max_size: usize,
    ttl: Duration,
    clock: Arc<dyn IClock>,
}

impl IndexCache {
    pub fn new(max_size: usize, ttl_secs: u64, clock: Arc<dyn IClock>) -> Self {
        Self {
            entries: DashMap::new(),
            build_locks: DashMap::new(),
            max_size,
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }

    /// Fetch a live entry. Expired entries are removed and reported as a
    /// miss, which forces the caller onto the rebuild path.
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        let entry = {
            let guard = self.entries.get(key)?;
            Arc::clone(guard.value())
        };
        if self.clock.now() - entry.built_at > self.ttl {
            debug!(key, "cache entry expired");
            self.entries.remove(key);
            return None;
        }
        debug!(key, documents = entry.document_count, "cache hit");
        Some(entry)
    }

    /// Insert a freshly built index, evicting the least-recently-built
    /// entry if the cache is full.
    pub fn put(&self, key: &str, index: Arc<Bm25Index>) -> Arc<CacheEntry> {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_size {
            self.evict_oldest();
        }
        let entry = Arc::new(CacheEntry {
            key: key.to_string(),
            document_count: index.len(),
            built_at: self.clock.now(),
            index,
        });
        self.entries.insert(key.to_string(), entry.clone());
        debug!(key, documents = entry.document_count, "cache store");
        entry
    }

    /// Return the cached entry for `key`, or run `build` and cache its
    /// output. Concurrent callers for the same key share one build.
    pub async fn get_or_build<F, Fut>(&self, key: &str, build: F) -> LatticeResult<Arc<CacheEntry>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = LatticeResult<Bm25Index>>,
    {
        if let Some(entry) = self.get(key) {
            return Ok(entry);
        }

        let lock = self
            .build_locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // A concurrent caller may have finished the build while we waited.
        if let Some(entry) = self.get(key) {
            return Ok(entry);
        }

        let index = build().await?;
        info!(key, documents = index.len(), "index built");
        Ok(self.put(key, Arc::new(index)))
    }

    /// Drop one entry. The next request for the key rebuilds.
    pub fn invalidate(&self, key: &str) {
        if self.entries.remove(key).is_some() {
            info!(key, "cache entry invalidated");
        }
    }

    /// Drop every entry for a record kind. Called when that kind's records
    /// mutate, so stale term statistics are never served.
    pub fn invalidate_kind(&self, kind: RecordKind) {
        let prefix = format!("{}:", kind.as_str());
        self.entries.retain(|key, _| !key.starts_with(&prefix));
        info!(kind = kind.as_str(), "cache invalidated for kind");
    }

    /// Drop everything.
    pub fn clear(&self) {
        let size = self.entries.len();
        self.entries.clear();
        info!(size, "cache cleared");
    }

    /// Sweep expired entries.
    pub fn cleanup(&self) {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.built_at <= self.ttl);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "expired cache entries swept");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot for observability.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries: Vec<CacheEntryStats> = self
            .entries
            .iter()
            .map(|item| CacheEntryStats {
                key: item.key.clone(),
                document_count: item.document_count,
                age_secs: (now - item.built_at).num_seconds(),
            })
            .collect();
        CacheStats {
            size: entries.len(),
            max_size: self.max_size,
            entries,
        }
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|item| item.built_at)
            .map(|item| item.key().clone());
        if let Some(key) = oldest {
            debug!(key, "evicting least-recently-built cache entry");
            self.entries.remove(&key);
        }
    }
}
