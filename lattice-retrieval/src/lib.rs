//! # lattice-retrieval
//!
//! Hybrid retrieval over a knowledge graph: a BM25 inverted index, a
//! heuristic query router, weighted score fusion with a vector-similarity
//! collaborator, and a TTL/LRU cache of built indexes.
//!
//! The [`engine::SearchEngine`] orchestrates the full pipeline:
//! classify → fan out (BM25 ∥ vector) → fuse → filter → rank.

pub mod analyzer;
pub mod cache;
pub mod engine;
pub mod fusion;
pub mod index;
pub mod tokenizer;

pub use engine::SearchEngine;
pub use index::Bm25Index;
