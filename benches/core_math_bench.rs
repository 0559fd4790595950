use cartesian_rs::api::{LayerData, LayerKind, ValueSeries};
use cartesian_rs::core::ticks::{recommended_datetime_ticks, recommended_linear_ticks};
use cartesian_rs::core::{AxisValueType, Viewport};
use cartesian_rs::{CartesianConfig, CartesianEngine};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_tick_generation(c: &mut Criterion) {
    c.bench_function("linear_tick_generation", |b| {
        b.iter(|| {
            let _ = recommended_linear_ticks(
                black_box(-1_234.5),
                black_box(98_765.4),
                black_box(8),
                black_box(None),
            );
        })
    });
}

fn bench_datetime_tick_generation(c: &mut Criterion) {
    // Three years of Unix milliseconds.
    let min = 1_546_300_800_000.0;
    let max = 1_640_908_800_000.0;

    c.bench_function("datetime_tick_generation", |b| {
        b.iter(|| {
            let _ = recommended_datetime_ticks(black_box(min), black_box(max), black_box(8));
        })
    });
}

fn bench_engine_update_200_categories(c: &mut Criterion) {
    let labels: Vec<String> = (0..200).map(|i| format!("category {i}")).collect();
    let column_values: Vec<f64> = (0..200).map(|i| (i % 37) as f64 * 13.7).collect();
    let line_values: Vec<f64> = (0..200).map(|i| 500.0 + (i % 11) as f64 * 42.0).collect();

    let config = CartesianConfig::new(Viewport::new(800, 600));
    let mut engine = CartesianEngine::new(config).expect("engine init");
    engine
        .add_layer(
            LayerKind::Column,
            LayerData {
                category_labels: labels.clone(),
                category_values: None,
                category_type: AxisValueType::Text,
                series: vec![ValueSeries::new("sales", column_values)],
            },
        )
        .expect("column layer");
    engine
        .add_layer(
            LayerKind::Line,
            LayerData {
                category_labels: labels,
                category_values: None,
                category_type: AxisValueType::Text,
                series: vec![ValueSeries::new("target", line_values)],
            },
        )
        .expect("line layer");

    c.bench_function("engine_update_200_categories", |b| {
        b.iter(|| {
            let _ = engine
                .update(black_box(Viewport::new(800, 600)), true)
                .expect("update should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_tick_generation,
    bench_datetime_tick_generation,
    bench_engine_update_200_categories
);
criterion_main!(benches);
