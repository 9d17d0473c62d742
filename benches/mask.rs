//! Performance benchmarks for a3s-triage
//!
//! Run with: cargo bench

use std::sync::Arc;

use a3s_triage::model::{LinearClassifier, ModelArtifact, TfidfVectorizer};
use a3s_triage::{mask_pii, CategoryPredictor, MaskingEngine, ModelHandle, Pipeline};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const EMAIL: &str = "Hello support, this is Neha Sharma. My card 4111 1111 1111 1111 \
    (exp 08/27, cvv 123) was charged twice. My DOB is 14/03/1991 and my Aadhaar is \
    1234 5678 9012. Call me on 9876543210 or write to neha.sharma@example.com.";

fn bench_masking(c: &mut Criterion) {
    let engine = MaskingEngine::new();

    c.bench_function("mask/pii_heavy", |b| {
        b.iter(|| engine.mask(black_box(EMAIL)))
    });

    let clean = "The export button on the reports page does nothing. ".repeat(20);
    c.bench_function("mask/clean_1k", |b| b.iter(|| mask_pii(black_box(&clean))));

    let long = EMAIL.repeat(50);
    c.bench_function("mask/pii_heavy_x50", |b| {
        b.iter(|| engine.mask(black_box(&long)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let terms = ["charged", "twice", "card", "refund", "login", "error"];
    let artifact = ModelArtifact {
        vectorizer: TfidfVectorizer {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: vec![1.0; terms.len()],
            ngram_range: (1, 2),
            stop_words: Default::default(),
            lowercase: true,
            sublinear_tf: false,
            norm: "l2".to_string(),
        },
        classifier: LinearClassifier {
            classes: vec!["Incident".to_string(), "Problem".to_string()],
            coef: vec![vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0], vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0]],
            intercept: vec![0.0, 0.0],
        },
    };
    let handle = ModelHandle::from_artifact(artifact, "bench").unwrap();
    let pipeline = Pipeline::new(Arc::new(CategoryPredictor::new(Arc::new(handle))));

    c.bench_function("pipeline/classify", |b| {
        b.iter(|| pipeline.classify(black_box(EMAIL)).unwrap())
    });
}

criterion_group!(benches, bench_masking, bench_pipeline);
criterion_main!(benches);
