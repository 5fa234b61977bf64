//! Index build and search throughput over a synthetic corpus.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lattice_core::config::FusionWeights;
use lattice_core::models::{RecordKind, VectorHit};
use lattice_retrieval::fusion::fuse;
use lattice_retrieval::Bm25Index;

const WORDS: [&str; 12] = [
    "organization",
    "strategy",
    "meeting",
    "initiative",
    "budget",
    "roadmap",
    "product",
    "market",
    "リサーチ",
    "戦略",
    "組織",
    "会議",
];

fn synthetic_text(seed: usize) -> String {
    (0..24)
        .map(|i| WORDS[(seed * 7 + i * 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn built_index(docs: usize) -> Bm25Index {
    let mut index = Bm25Index::new();
    for i in 0..docs {
        index.add_document(&format!("doc-{i}"), &synthetic_text(i));
    }
    index
}

fn bench_index_build(c: &mut Criterion) {
    c.bench_function("bm25_build_1k_docs", |b| {
        b.iter(|| black_box(built_index(1_000)));
    });
}

fn bench_search(c: &mut Criterion) {
    let index = built_index(1_000);
    c.bench_function("bm25_search_1k_docs", |b| {
        b.iter(|| black_box(index.search(black_box("strategy roadmap 戦略"), 10)));
    });
}

fn bench_fusion(c: &mut Criterion) {
    let index = built_index(1_000);
    let bm25_results = index.search("strategy roadmap", 100);
    let vector_hits: Vec<VectorHit> = (0..100)
        .map(|i| VectorHit {
            id: format!("doc-{}", i * 3),
            similarity: 1.0 - i as f64 * 0.007,
        })
        .collect();

    c.bench_function("fuse_100_candidates", |b| {
        b.iter(|| {
            black_box(fuse(
                RecordKind::Entity,
                black_box(&vector_hits),
                black_box(&bm25_results),
                FusionWeights::default(),
                10,
            ))
        });
    });
}

criterion_group!(benches, bench_index_build, bench_search, bench_fusion);
criterion_main!(benches);
