use bizpulse::catalog::{CatalogConfig, CatalogGenerator};
use bizpulse::layout::{build_matrix_view, layout_honeycomb, layout_matrix, HexItem, HoneycombConfig, MatrixConfig};
use bizpulse::metrics::{generate_series, TimeWindow};
use bizpulse::trace::TraceGenerator;
use bizpulse::{CosmeticRandom, UnifiedDataBuilder, UnifiedDataStore};
use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const ASSET_TYPES: [&str; 6] = ["server", "database", "middleware", "application", "network", "service"];

/// Benchmark a full unified cache build over catalogs of growing size
fn bench_unified_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("unified_build");
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    for size in [10, 100, 500].iter() {
        let catalog = Arc::new(
            CatalogGenerator::new(CatalogConfig {
                system_count: *size,
                ..Default::default()
            })
            .generate(),
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let builder = UnifiedDataBuilder::new(Default::default(), anchor);
                let mut store = UnifiedDataStore::new(Arc::clone(&catalog), builder);
                criterion::black_box(store.all().len());
            });
        });
    }
    group.finish();
}

/// Benchmark series generation for long windows
fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let window = TimeWindow::last_hours(anchor, 24);

    for points in [24, 288, 1440].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(points), points, |b, &points| {
            b.iter(|| {
                let series = generate_series(points, 50.0, 20.0, 12345, &window);
                criterion::black_box(series.len());
            });
        });
    }
    group.finish();
}

/// Benchmark the matrix layout including collision spreading
fn bench_matrix_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_layout");
    let config = MatrixConfig::default();

    for size in [24, 200, 1000].iter() {
        let catalog = CatalogGenerator::new(CatalogConfig {
            system_count: *size,
            ..Default::default()
        })
        .generate();
        let view = build_matrix_view(catalog.systems());

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let layout = layout_matrix(&view, &config, &mut rng);
                criterion::black_box(layout.placements.len());
            });
        });
    }
    group.finish();
}

/// Benchmark the honeycomb layout for large asset counts
fn bench_honeycomb_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("honeycomb_layout");
    let config = HoneycombConfig::default();

    for size in [36, 500, 5000].iter() {
        let items: Vec<HexItem> = (0..*size)
            .map(|i| HexItem::new(i as u64, ASSET_TYPES[i % ASSET_TYPES.len()]))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let layout = layout_honeycomb(&items, &config);
                criterion::black_box(layout.placements.len());
            });
        });
    }
    group.finish();
}

/// Benchmark trace tree generation
fn bench_trace_generation(c: &mut Criterion) {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let generator = TraceGenerator::new(0.3);

    c.bench_function("trace_generate_100", |b| {
        let mut rng = CosmeticRandom::seeded(11);
        b.iter(|| {
            let traces = generator.generate_many(100, anchor, &mut rng);
            criterion::black_box(traces.len());
        });
    });
}

criterion_group!(
    benches,
    bench_unified_build,
    bench_series,
    bench_matrix_layout,
    bench_honeycomb_layout,
    bench_trace_generation,
);
criterion_main!(benches);
