//! Weighted score fusion: combined = w_v·norm(similarity) + w_b·norm(bm25).
//!
//! The two signals arrive on incompatible scales (cosine similarity vs.
//! unbounded BM25), so each is min-max normalized to [0, 1] within its own
//! candidate set before the weighted sum. A candidate seen by only one
//! signal keeps a zero contribution from the other — still eligible, but
//! documents retrieved by both signals are rewarded.

use std::collections::BTreeSet;
use std::collections::HashMap;

use tracing::debug;

use lattice_core::config::FusionWeights;
use lattice_core::models::{
    HybridSearchResult, RecordKind, SearchResult, SignalSource, VectorHit,
};

/// A candidate mid-fusion, before ranks are resolved.
struct Candidate {
    score: f64,
    similarity: f64,
    bm25_score: f64,
    normalized_vector: f64,
    normalized_bm25: f64,
    vector_rank: Option<usize>,
    bm25_rank: Option<usize>,
    matched_terms: BTreeSet<String>,
}

impl Candidate {
    fn new() -> Self {
        Self {
            score: 0.0,
            similarity: 0.0,
            bm25_score: 0.0,
            normalized_vector: 0.0,
            normalized_bm25: 0.0,
            vector_rank: None,
            bm25_rank: None,
            matched_terms: BTreeSet::new(),
        }
    }

    fn source(&self) -> SignalSource {
        match (self.vector_rank, self.bm25_rank) {
            (Some(_), Some(_)) => SignalSource::Hybrid,
            (Some(_), None) => SignalSource::Vector,
            _ => SignalSource::Bm25,
        }
    }
}

/// Merge a vector result set and a BM25 result set into one ranked list.
///
/// Ordered by descending combined score, exact ties broken by original
/// rank — vector rank first, since semantic relevance is the primary
/// signal when scores tie — then truncated to `limit`.
pub fn fuse(
    kind: RecordKind,
    vector_hits: &[VectorHit],
    bm25_results: &[SearchResult],
    weights: FusionWeights,
    limit: usize,
) -> Vec<HybridSearchResult> {
    let vector_norms = min_max_normalize(&vector_hits.iter().map(|h| h.similarity).collect::<Vec<_>>());
    let bm25_norms = min_max_normalize(&bm25_results.iter().map(|r| r.score).collect::<Vec<_>>());

    let mut candidates: HashMap<String, Candidate> = HashMap::new();

    for (rank, (hit, norm)) in vector_hits.iter().zip(&vector_norms).enumerate() {
        let slot = candidates.entry(hit.id.clone()).or_insert_with(Candidate::new);
        slot.similarity = hit.similarity;
        slot.normalized_vector = *norm;
        slot.vector_rank = Some(rank);
    }
    for (rank, (result, norm)) in bm25_results.iter().zip(&bm25_norms).enumerate() {
        let slot = candidates
            .entry(result.id.clone())
            .or_insert_with(Candidate::new);
        slot.bm25_score = result.score;
        slot.normalized_bm25 = *norm;
        slot.bm25_rank = Some(rank);
        slot.matched_terms = result.matched_terms.clone();
    }

    let mut fused: Vec<(String, Candidate)> = candidates.into_iter().collect();
    for (_, candidate) in &mut fused {
        candidate.score = weights.vector * candidate.normalized_vector
            + weights.bm25 * candidate.normalized_bm25;
    }

    fused.sort_by(|(_, a), (_, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| rank_or_last(a.vector_rank).cmp(&rank_or_last(b.vector_rank)))
            .then_with(|| rank_or_last(a.bm25_rank).cmp(&rank_or_last(b.bm25_rank)))
    });
    fused.truncate(limit);

    debug!(
        kind = kind.as_str(),
        vector = vector_hits.len(),
        bm25 = bm25_results.len(),
        fused = fused.len(),
        "fusion complete"
    );
    fused
        .into_iter()
        .map(|(id, candidate)| HybridSearchResult {
            kind,
            id,
            score: candidate.score,
            similarity: candidate.similarity,
            bm25_score: candidate.bm25_score,
            source: candidate.source(),
            matched_terms: candidate.matched_terms,
        })
        .collect()
}

fn rank_or_last(rank: Option<usize>) -> usize {
    rank.unwrap_or(usize::MAX)
}

/// Min-max normalization to [0, 1] within the candidate set. When every
/// score is the same distinct value the mapping degenerates; the raw score
/// is passed through unchanged to avoid dividing by zero.
fn min_max_normalize(scores: &[f64]) -> Vec<f64> {
    let Some(min) = scores.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = scores.iter().copied().reduce(f64::max).unwrap_or(min);
    if max == min {
        return scores.to_vec();
    }
    scores.iter().map(|s| (s - min) / (max - min)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, similarity: f64) -> VectorHit {
        VectorHit {
            id: id.to_string(),
            similarity,
        }
    }

    fn bm25(id: &str, score: f64) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            score,
            matched_terms: BTreeSet::new(),
        }
    }

    const EVEN: FusionWeights = FusionWeights {
        vector: 0.5,
        bm25: 0.5,
    };

    #[test]
    fn both_signals_beat_single_signal() {
        let vector = vec![hit("shared", 0.9), hit("v-only", 0.8)];
        let keyword = vec![bm25("shared", 5.0), bm25("b-only", 4.0)];
        let fused = fuse(RecordKind::Entity, &vector, &keyword, EVEN, 10);
        assert_eq!(fused.len(), 3);
        assert_eq!(fused[0].id, "shared");
        assert_eq!(fused[0].source, SignalSource::Hybrid);
    }

    #[test]
    fn vector_only_weights_reproduce_vector_order() {
        let vector = vec![hit("a", 0.9), hit("b", 0.5), hit("c", 0.2)];
        let keyword = vec![bm25("c", 9.0), bm25("b", 5.0)];
        let weights = FusionWeights {
            vector: 1.0,
            bm25: 0.0,
        };
        let fused = fuse(RecordKind::Entity, &vector, &keyword, weights, 10);
        let order: Vec<&str> = fused.iter().map(|r| r.id.as_str()).take(3).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn bm25_only_weights_reproduce_bm25_order() {
        let keyword = vec![bm25("x", 9.0), bm25("y", 5.0), bm25("z", 1.0)];
        let weights = FusionWeights {
            vector: 0.0,
            bm25: 1.0,
        };
        let fused = fuse(RecordKind::Entity, &[], &keyword, weights, 10);
        let order: Vec<&str> = fused.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn single_signal_candidates_remain_eligible() {
        let fused = fuse(
            RecordKind::Topic,
            &[],
            &[bm25("only", 3.0)],
            EVEN,
            10,
        );
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].source, SignalSource::Bm25);
        assert_eq!(fused[0].bm25_score, 3.0);
        assert_eq!(fused[0].similarity, 0.0);
    }

    #[test]
    fn exact_ties_prefer_vector_rank() {
        // Each candidate appears in exactly one list; single-value identity
        // mapping makes the combined scores tie at 0.5·0.4, and the
        // vector-ranked candidate must come first.
        let fused = fuse(
            RecordKind::Entity,
            &[hit("from-vector", 0.4)],
            &[bm25("from-bm25", 0.4)],
            EVEN,
            10,
        );
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].id, "from-vector");
        assert_eq!(fused[1].id, "from-bm25");
    }

    #[test]
    fn limit_truncates_fused_output() {
        let vector: Vec<VectorHit> = (0..10).map(|i| hit(&format!("v{i}"), 0.9 - i as f64 * 0.05)).collect();
        let fused = fuse(RecordKind::Entity, &vector, &[], EVEN, 3);
        assert_eq!(fused.len(), 3);
    }

    #[test]
    fn uniform_scores_fall_back_to_identity() {
        // All-equal similarity would divide by zero under min-max; the raw
        // value passes through instead.
        let vector = vec![hit("a", 0.7), hit("b", 0.7)];
        let fused = fuse(
            RecordKind::Entity,
            &vector,
            &[],
            FusionWeights {
                vector: 1.0,
                bm25: 0.0,
            },
            10,
        );
        assert_eq!(fused.len(), 2);
        assert!((fused[0].score - 0.7).abs() < 1e-12);
        assert!((fused[1].score - 0.7).abs() < 1e-12);
        // Identical scores: vector rank breaks the tie.
        assert_eq!(fused[0].id, "a");
    }

    #[test]
    fn normalization_brings_signals_onto_common_scale() {
        // Raw BM25 scores dwarf cosine similarities; after normalization the
        // top candidate of each signal contributes equally.
        let vector = vec![hit("v-top", 0.9), hit("v-low", 0.1)];
        let keyword = vec![bm25("b-top", 120.0), bm25("b-low", 3.0)];
        let fused = fuse(RecordKind::Entity, &vector, &keyword, EVEN, 10);
        let v_top = fused.iter().find(|r| r.id == "v-top").unwrap();
        let b_top = fused.iter().find(|r| r.id == "b-top").unwrap();
        assert!((v_top.score - b_top.score).abs() < 1e-12);
    }
}
