use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::FeatureVectorBuilder;
use observation::{ObservationInput, Validator};

fn bench_build(c: &mut Criterion) {
    let builder = FeatureVectorBuilder::default();
    let input = ObservationInput {
        wind_gust_dir: Some("WNW".to_string()),
        ..ObservationInput::form_defaults()
    };
    let obs = Validator::default()
        .validate(&input)
        .expect("form defaults are valid");

    c.bench_function("build", |b| b.iter(|| builder.build(black_box(&obs))));
    c.bench_function("build_input", |b| {
        b.iter(|| builder.build_input(black_box(&input)))
    });
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
