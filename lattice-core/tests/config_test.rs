//! Config defaults, fallbacks, and serde round-trips.

use lattice_core::config::{Bm25Config, FusionWeights, RetrievalConfig, SearchConfig};
use lattice_core::models::RecordKind;

#[test]
fn search_config_defaults_enable_everything() {
    let config = SearchConfig::default();
    assert!(config.enable_bm25);
    assert!(config.enable_router);
    assert!(config.use_hybrid_by_default);
    assert_eq!(config.weights.vector, 0.6);
    assert_eq!(config.weights.bm25, 0.4);
}

#[test]
fn conservative_fallback_disables_everything() {
    let config = SearchConfig::conservative();
    assert!(!config.enable_bm25);
    assert!(!config.enable_router);
    assert!(!config.use_hybrid_by_default);
}

#[test]
fn bm25_defaults_match_standard_parameters() {
    let config = Bm25Config::default();
    assert_eq!(config.k1, 1.5);
    assert_eq!(config.b, 0.75);
}

#[test]
fn topic_corpora_get_higher_k1() {
    let config = RetrievalConfig::default();
    assert_eq!(config.bm25_for_kind(RecordKind::Topic).k1, 2.0);
    assert_eq!(config.bm25_for_kind(RecordKind::Entity).k1, 1.5);
    // b is shared across kinds.
    assert_eq!(config.bm25_for_kind(RecordKind::Topic).b, 0.75);
}

#[test]
fn negative_weights_are_rejected() {
    let weights = FusionWeights {
        vector: -0.1,
        bm25: 0.4,
    };
    assert!(weights.validate().is_err());

    let weights = FusionWeights {
        vector: 0.0,
        bm25: 1.0,
    };
    assert!(weights.validate().is_ok());
}

#[test]
fn search_config_json_round_trip() {
    let config = SearchConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: SearchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn partial_json_fills_in_defaults() {
    let back: SearchConfig = serde_json::from_str(r#"{"enable_bm25": false}"#).unwrap();
    assert!(!back.enable_bm25);
    assert!(back.enable_router);
    assert_eq!(back.weights, FusionWeights::default());
}

#[test]
fn retrieval_config_from_toml() {
    let toml = r#"
        vector_timeout_ms = 2500
        cache_max_entries = 4

        [bm25]
        k1 = 1.2
    "#;
    let config = RetrievalConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.vector_timeout_ms, 2500);
    assert_eq!(config.cache_max_entries, 4);
    assert_eq!(config.bm25.k1, 1.2);
    // Unspecified fields fall back to defaults.
    assert_eq!(config.bm25.b, 0.75);
    assert_eq!(config.cache_ttl_secs, 1800);
}

#[test]
fn retrieval_config_rejects_malformed_toml() {
    assert!(RetrievalConfig::from_toml_str("vector_timeout_ms = \"soon\"").is_err());
}
