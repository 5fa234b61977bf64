//! Heuristic query classifier: string pattern matching over the query.
//!
//! Keyword-shaped queries (proper nouns, quoted phrases, short and dense)
//! favor exact-match BM25; natural-language queries (question phrasing,
//! descriptive structure) favor the vector signal. Every fired heuristic is
//! recorded in the `reasons` trail for operators.

use std::sync::LazyLock;

use regex::Regex;

use lattice_core::models::{QueryAnalysis, QueryType};
use lattice_core::traits::IQueryClassifier;

/// Adjacent capitalized words, e.g. "Toyota Motor".
static PROPER_NOUN_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+ [A-Z][a-z]+").unwrap());

/// A single capitalized word or a Han run of two or more characters.
static PROPER_NOUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+|[\u{4E00}-\u{9FAF}]{2,}").unwrap());

/// A double-quoted phrase (ASCII or CJK corner brackets).
static QUOTED_PHRASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]+"|「[^」]+」"#).unwrap());

/// Question phrasing, English and Japanese.
static QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(what is|what does|who is|where is|when is|why|how to|how do)\b|とは|の定義|意味|誰|何",
    )
    .unwrap()
});

/// Descriptive/relational phrasing that wants semantic matching.
static DESCRIPTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(related to|relationship|connection|between .+ and|strategy|concept|way)\b|の関係|に関連|関連する|つながり|方法|戦略|考え方|どう",
    )
    .unwrap()
});

/// English function words; a high share suggests natural-language phrasing.
const FUNCTION_WORDS: [&str; 14] = [
    "the", "a", "an", "of", "to", "in", "on", "for", "with", "and", "or", "is", "are", "does",
];

/// Queries at or under this many words count as short.
const SHORT_QUERY_WORDS: usize = 3;

/// Queries over this many words count as long-form.
const LONG_QUERY_WORDS: usize = 7;

/// The default classifier: regex heuristics with a margin-based confidence.
#[derive(Debug, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IQueryClassifier for HeuristicClassifier {
    fn classify(&self, query: &str) -> QueryAnalysis {
        let query = query.trim();
        if query.is_empty() {
            return QueryAnalysis::empty();
        }

        let words: Vec<&str> = query.split_whitespace().collect();
        let keywords: Vec<String> = words
            .iter()
            .filter(|w| w.chars().count() > 1)
            .map(|w| w.to_lowercase())
            .collect();

        let mut entities: Vec<String> = Vec::new();
        let mut reasons: Vec<String> = Vec::new();
        let mut keyword_score = 0.0_f64;
        let mut semantic_score = 0.0_f64;

        if PROPER_NOUN_PAIR_RE.is_match(query) {
            keyword_score += 1.0;
            reasons.push("adjacent proper nouns".to_string());
        }
        if QUOTED_PHRASE_RE.is_match(query) {
            keyword_score += 1.0;
            reasons.push("quoted phrase".to_string());
        }

        let proper_nouns: Vec<&str> = PROPER_NOUN_RE
            .find_iter(query)
            .map(|m| m.as_str())
            .collect();
        match proper_nouns.len() {
            0 => {}
            1 => {
                keyword_score += 0.5;
                reasons.push(format!("proper-noun-like token: {}", proper_nouns[0]));
            }
            n => {
                keyword_score += 1.0;
                reasons.push(format!("{n} proper-noun-like tokens"));
            }
        }
        entities.extend(proper_nouns.iter().map(|s| s.to_string()));

        if QUESTION_RE.is_match(query) {
            semantic_score += 1.0;
            reasons.push("question phrasing".to_string());
        }
        if DESCRIPTIVE_RE.is_match(query) {
            semantic_score += 1.0;
            reasons.push("descriptive or relational phrasing".to_string());
        }
        if query.contains('?') || query.contains('？') {
            semantic_score += 0.5;
            reasons.push("question mark".to_string());
        }

        let function_word_count = words
            .iter()
            .filter(|w| FUNCTION_WORDS.contains(&w.to_lowercase().as_str()))
            .count();

        if words.len() > LONG_QUERY_WORDS {
            semantic_score += 1.0;
            reasons.push(format!("long query ({} words)", words.len()));
        } else if words.len() <= SHORT_QUERY_WORDS && function_word_count == 0 {
            keyword_score += 0.5;
            reasons.push(format!("short query ({} words), no function words", words.len()));
        }

        if function_word_count >= 2 {
            semantic_score += 0.5;
            reasons.push(format!("{function_word_count} function words"));
        }

        // Margin-based classification: the wider the gap between the two
        // signals, the higher the confidence.
        let (query_type, confidence) = if keyword_score == 0.0 && semantic_score == 0.0 {
            reasons.push("no decisive signal, defaulting to semantic".to_string());
            (QueryType::Semantic, 0.5)
        } else if keyword_score == semantic_score {
            reasons.push("keyword and semantic signals tied".to_string());
            (QueryType::Mixed, 0.6)
        } else {
            let (winner, top, second) = if keyword_score > semantic_score {
                (QueryType::Keyword, keyword_score, semantic_score)
            } else {
                (QueryType::Semantic, semantic_score, keyword_score)
            };
            (winner, (0.5 + (top - second) * 0.2).min(0.9))
        };

        QueryAnalysis {
            query_type,
            confidence,
            keywords,
            entities,
            reasons,
        }
    }
}
