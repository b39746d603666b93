//! Criterion benchmarks for numdiff_core estimators.
//!
//! Measures sequential versus concurrent stencil evaluation for cheap and
//! expensive functions, and the scattered gradient solve across sample
//! counts and dimensions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use numdiff_core::math::finite_difference::{estimate, EvalSettings, Stencil};
use numdiff_core::math::scattered::{estimate_gradient, SquaredExponential, Uniform};
use numdiff_core::types::{InterceptConstraint, NeighborSample};

/// A function whose evaluation cost is tunable.
fn expensive(x: f64, iterations: usize) -> f64 {
    (0..iterations).fold(x, |acc, i| (acc + i as f64 * 1e-9).sin().mul_add(0.5, x))
}

/// Deterministic pseudo-random samples around the origin.
fn generate_samples(n: usize, dim: usize) -> Vec<NeighborSample> {
    (0..n)
        .map(|i| {
            let location: Vec<f64> = (0..dim)
                .map(|k| (((i * 31 + k * 17 + i * k * 13) % 97) as f64 / 97.0 - 0.5) * 0.1)
                .collect();
            let value = location.iter().enumerate().map(|(k, c)| (k + 1) as f64 * c).sum::<f64>()
                + location.iter().map(|c| c * c).sum::<f64>();
            NeighborSample::new(location, value)
        })
        .collect()
}

/// Benchmark stencil evaluation, sequential and concurrent.
fn bench_finite_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("finite_difference");

    for cost in [1, 1_000, 100_000] {
        let f = move |x: f64| expensive(x, cost);
        let sequential = EvalSettings::new(1e-5).unwrap();
        let concurrent = sequential.with_concurrent(true);

        group.bench_with_input(BenchmarkId::new("sequential", cost), &cost, |b, _| {
            b.iter(|| estimate(f, black_box(0.5), &Stencil::CENTRAL_2ND, &sequential).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("concurrent", cost), &cost, |b, _| {
            b.iter(|| estimate(f, black_box(0.5), &Stencil::CENTRAL_2ND, &concurrent).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the weighted least-squares gradient.
fn bench_scattered_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("scattered_gradient");
    let kernel = SquaredExponential::new(0.05).unwrap();

    for dim in [2, 5] {
        for n in [10, 100, 1000] {
            let samples = generate_samples(n, dim);
            let query = vec![0.0; dim];
            let id = format!("d{}_n{}", dim, n);

            group.bench_with_input(BenchmarkId::new("uniform_free", &id), &samples, |b, s| {
                b.iter(|| {
                    estimate_gradient(black_box(&query), s, &Uniform, InterceptConstraint::free())
                        .unwrap()
                });
            });
            group.bench_with_input(BenchmarkId::new("sq_exp_forced", &id), &samples, |b, s| {
                b.iter(|| {
                    estimate_gradient(
                        black_box(&query),
                        s,
                        &kernel,
                        InterceptConstraint::forced(0.0),
                    )
                    .unwrap()
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_finite_difference, bench_scattered_gradient);
criterion_main!(benches);
