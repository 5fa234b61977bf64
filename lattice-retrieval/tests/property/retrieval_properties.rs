use std::collections::BTreeSet;

use proptest::prelude::*;

use lattice_core::config::FusionWeights;
use lattice_core::models::{RecordKind, SearchResult, VectorHit};
use lattice_retrieval::fusion::fuse;
use lattice_retrieval::tokenizer::tokenize;
use lattice_retrieval::Bm25Index;

/// Lowercase ASCII words of 2+ chars: always tokenizable, never stop tokens.
fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

fn corpus() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            "[a-z]{1,6}",
            prop::collection::vec(word(), 1..8).prop_map(|ws| ws.join(" ")),
        ),
        1..12,
    )
    .prop_map(|docs| {
        // Deduplicate ids, keeping the last occurrence like an upsert would.
        let mut seen = std::collections::HashMap::new();
        for (id, text) in docs {
            seen.insert(id, text);
        }
        seen.into_iter().collect()
    })
}

proptest! {
    #[test]
    fn tokenizer_never_emits_single_ascii_chars(s in ".{0,80}") {
        for token in tokenize(&s) {
            let char_count = token.chars().count();
            prop_assert!(char_count >= 1);
            if char_count == 1 {
                let c = token.chars().next().unwrap();
                prop_assert!(!c.is_ascii_alphanumeric(), "stop token {token:?} leaked");
            }
        }
    }

    #[test]
    fn tokenizer_output_is_lowercase(s in "[A-Za-z0-9 ]{0,60}") {
        for token in tokenize(&s) {
            prop_assert_eq!(token.clone(), token.to_lowercase());
        }
    }

    #[test]
    fn add_then_remove_restores_empty_state(docs in corpus()) {
        let mut index = Bm25Index::new();
        for (id, text) in &docs {
            index.add_document(id, text);
        }
        for (id, _) in &docs {
            index.remove_document(id);
        }
        let stats = index.stats();
        prop_assert_eq!(stats.document_count, 0);
        prop_assert_eq!(stats.term_count, 0, "no term may retain a nonzero docFreq");
        prop_assert_eq!(stats.avg_doc_length, 0.0);
    }

    #[test]
    fn search_respects_limit(docs in corpus(), query in word(), limit in 0usize..8) {
        let mut index = Bm25Index::new();
        for (id, text) in &docs {
            index.add_document(id, text);
        }
        prop_assert!(index.search(&query, limit).len() <= limit);
    }

    #[test]
    fn readding_is_idempotent(docs in corpus()) {
        let mut once = Bm25Index::new();
        let mut twice = Bm25Index::new();
        for (id, text) in &docs {
            once.add_document(id, text);
            twice.add_document(id, text);
            twice.add_document(id, text);
        }
        prop_assert_eq!(once.stats(), twice.stats());
        for (_, text) in &docs {
            prop_assert_eq!(once.search(text, 20), twice.search(text, 20));
        }
    }

    #[test]
    fn search_is_deterministic(docs in corpus(), query in word()) {
        let mut index = Bm25Index::new();
        for (id, text) in &docs {
            index.add_document(id, text);
        }
        prop_assert_eq!(index.search(&query, 10), index.search(&query, 10));
    }

    #[test]
    fn scores_are_always_finite(docs in corpus(), query in word()) {
        let mut index = Bm25Index::new();
        for (id, text) in &docs {
            index.add_document(id, text);
        }
        for result in index.search(&query, 20) {
            prop_assert!(result.score.is_finite());
            prop_assert!(!result.matched_terms.is_empty());
        }
    }

    #[test]
    fn term_frequency_is_monotonic_while_idf_is_positive(tf in 1usize..24, filler_len in 1usize..16) {
        // Two padding documents keep the probed term's IDF positive, where
        // more occurrences must never score lower.
        let filler = vec!["filler"; filler_len].join(" ");
        let score_at = |tf: usize| {
            let mut index = Bm25Index::new();
            index.add_document("probe", &vec!["apple"; tf].join(" "));
            index.add_document("pad-1", &filler);
            index.add_document("pad-2", &filler);
            index
                .search("apple", 1)
                .first()
                .map(|r| r.score)
                .unwrap_or(0.0)
        };
        prop_assert!(score_at(tf + 1) >= score_at(tf) - 1e-12);
    }

    #[test]
    fn fusion_respects_limit_and_keeps_scores_finite(
        vector_scores in prop::collection::vec(-1.0f64..1.0, 0..10),
        bm25_scores in prop::collection::vec(0.0f64..20.0, 0..10),
        limit in 0usize..8,
    ) {
        let vector: Vec<VectorHit> = vector_scores
            .iter()
            .enumerate()
            .map(|(i, s)| VectorHit { id: format!("v{i}"), similarity: *s })
            .collect();
        let bm25: Vec<SearchResult> = bm25_scores
            .iter()
            .enumerate()
            .map(|(i, s)| SearchResult {
                id: format!("b{i}"),
                score: *s,
                matched_terms: BTreeSet::new(),
            })
            .collect();

        let fused = fuse(
            RecordKind::Entity,
            &vector,
            &bm25,
            FusionWeights::default(),
            limit,
        );
        prop_assert!(fused.len() <= limit);
        for result in &fused {
            prop_assert!(result.score.is_finite());
        }
        // Descending order.
        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
