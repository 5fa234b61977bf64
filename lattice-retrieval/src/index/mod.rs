//! Keyword index over a named corpus.

mod bm25;

pub use bm25::Bm25Index;
