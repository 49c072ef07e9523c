//! Criterion benchmarks for pricer_core grid interpolation.
//!
//! A gridded local-volatility path does one clamped lookup per time step,
//! so lookup cost bounds the Dupire per-step cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::interpolators::BilinearInterpolator;

/// Square spot × time volatility grid with a smile in spot.
fn smile_grid(knots: usize) -> BilinearInterpolator<f64> {
    let spots: Vec<f64> = (0..knots)
        .map(|i| 50.0 + 100.0 * i as f64 / (knots - 1) as f64)
        .collect();
    let times: Vec<f64> = (0..knots).map(|j| 2.0 * j as f64 / (knots - 1) as f64).collect();
    let vols: Vec<Vec<f64>> = spots
        .iter()
        .map(|&s| {
            times
                .iter()
                .map(|&t| 0.2 + 0.1 * (s / 100.0).ln().abs() + 0.02 * t)
                .collect()
        })
        .collect();
    let rows: Vec<&[f64]> = vols.iter().map(Vec::as_slice).collect();
    BilinearInterpolator::new(&spots, &times, &rows).unwrap()
}

fn bench_grid_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_lookup");

    for knots in [10, 50, 200] {
        let grid = smile_grid(knots);

        group.bench_with_input(BenchmarkId::new("strict", knots), &grid, |b, grid| {
            b.iter(|| grid.interpolate(black_box(101.3), black_box(0.7)).unwrap());
        });

        // One simulated path: spot drifts outside the grid on some steps.
        let path: Vec<(f64, f64)> = (0..100)
            .map(|step| (30.0 + 1.5 * step as f64, 0.03 * step as f64))
            .collect();
        group.bench_with_input(BenchmarkId::new("clamped_path", knots), &grid, |b, grid| {
            b.iter(|| {
                path.iter()
                    .map(|&(s, t)| grid.interpolate_clamped(black_box(s), black_box(t)))
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_lookup);
criterion_main!(benches);
