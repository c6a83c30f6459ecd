use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crop_advisor::{ArtifactPaths, InputSnapshot, Reading, Recommender};
use std::path::PathBuf;

fn bench_prediction_cycle(c: &mut Criterion) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/model");
    let Ok(recommender) = Recommender::load(&ArtifactPaths::in_dir(dir)) else {
        eprintln!("Skipping benchmark: fixture model not available");
        return;
    };

    let snapshot = InputSnapshot::defaults("South", "Summer").with_reading(Reading::Rainfall, 300.0);

    c.bench_function("recommend", |b| {
        b.iter(|| recommender.recommend(black_box(&snapshot)))
    });

    c.bench_function("explain", |b| {
        b.iter(|| crop_advisor::explain(black_box("Rice"), black_box(&snapshot)))
    });
}

criterion_group!(benches, bench_prediction_cycle);
criterion_main!(benches);
