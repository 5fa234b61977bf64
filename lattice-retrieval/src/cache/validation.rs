//! Invalid-score detection for cached indexes.

use lattice_core::models::SearchResult;

/// Whether every score in a served result set is a usable number.
///
/// NaN or infinite scores mean the index that produced them is corrupted
/// and must be invalidated and rebuilt, never trusted. Negative scores are
/// NOT flagged: a term present in more than half the corpus legitimately
/// carries negative IDF.
pub fn scores_are_valid(results: &[SearchResult]) -> bool {
    results.iter().all(|r| r.score.is_finite())
}
