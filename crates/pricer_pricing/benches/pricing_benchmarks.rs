//! Criterion benchmarks for pricer_pricing.
//!
//! Benchmarks cover:
//! - Dispatch overhead on top of a closed-form model
//! - Surface sweeps with varying grid sizes and worker counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_pricing::{AxisSpec, Dispatcher, EngineConfig, ModelParameters, ModelTag, SurfaceSweeper};

fn base() -> ModelParameters {
    ModelParameters::new()
        .with("S", 100.0)
        .with("K", 100.0)
        .with("T", 1.0)
        .with("r", 0.05)
        .with("sigma", 0.2)
        .with("steps", 100.0)
}

/// Benchmark single dispatches.
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let dispatcher = Dispatcher::default();
    let mut bs = base();
    bs.remove("steps");

    group.bench_function("black_scholes", |b| {
        b.iter(|| black_box(dispatcher.price(ModelTag::BlackScholes, &bs)))
    });
    group.bench_function("binomial_100", |b| {
        b.iter(|| black_box(dispatcher.price(ModelTag::Binomial, &base())))
    });

    group.finish();
}

/// Benchmark binomial surface sweeps.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);

    for workers in [1, 4] {
        let sweeper = SurfaceSweeper::new(Dispatcher::new(EngineConfig {
            workers: Some(workers),
            ..Default::default()
        }))
        .unwrap();

        for points in [11, 31] {
            let x = AxisSpec::new("S", 50.0, 150.0, points);
            let y = AxisSpec::new("sigma", 0.05, 1.0, points);
            group.bench_with_input(
                BenchmarkId::new(format!("binomial_{workers}_workers"), points),
                &(x, y),
                |b, (x, y)| b.iter(|| black_box(sweeper.sweep(ModelTag::Binomial, &base(), x, y))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_sweep);
criterion_main!(benches);
