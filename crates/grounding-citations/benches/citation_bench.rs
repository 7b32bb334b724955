use criterion::{criterion_group, criterion_main, Criterion};
use grounding_citations::claims::summary_claims;
use grounding_citations::GroundingEvaluator;
use grounding_core::config::{CitationConfig, EmbeddingConfig};
use grounding_core::models::TranscriptUnits;
use grounding_embeddings::EmbeddingEngine;

fn transcript(n: usize) -> TranscriptUnits {
    let sentences: Vec<String> = (0..n)
        .map(|i| format!("Speaker {} notes that item {i} is due on day {}.", i % 4, i % 30))
        .collect();
    TranscriptUnits::new(sentences, Vec::new())
}

fn bench_build_corpora(c: &mut Criterion) {
    let units = transcript(300);
    c.bench_function("build_corpora_300_sentences", |b| {
        b.iter(|| {
            let engine = EmbeddingEngine::new(EmbeddingConfig::default()).unwrap();
            let evaluator = GroundingEvaluator::new(&engine, CitationConfig::default()).unwrap();
            evaluator.build_corpora(&units).unwrap()
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = EmbeddingEngine::new(EmbeddingConfig::default()).unwrap();
    let evaluator = GroundingEvaluator::new(&engine, CitationConfig::default()).unwrap();
    let corpora = evaluator.build_corpora(&transcript(300)).unwrap();
    let claims = summary_claims((0..50).map(|i| format!("Item {i} is due on day {}.", i % 30)));

    c.bench_function("evaluate_50_claims", |b| {
        b.iter(|| evaluator.evaluate(claims.clone(), &corpora))
    });
}

criterion_group!(benches, bench_build_corpora, bench_evaluate);
criterion_main!(benches);
