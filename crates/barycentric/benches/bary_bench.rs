//! Criterion benchmarks for conversion, edge projection, and lattice building.
//! Focus sizes: d in {3, 5, 8, 16, 32}.

use barycentric::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn bench_bary(c: &mut Criterion) {
    let mut group = c.benchmark_group("bary");
    for &d in &[3usize, 5, 8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("to_cartesian_batch", d), &d, |b, &d| {
            b.iter_batched(
                || draw_batch(d, 43, 256).unwrap(),
                |batch| {
                    let _pts = to_cartesian_batch(&batch).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("bary_edges", d), &d, |b, &d| {
            b.iter_batched(
                || draw_bary(d, ReplayToken::new(44, 0)).unwrap(),
                |bary| {
                    let _e = bary_edges(&bary).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("lattice", d), &d, |b, &d| {
            b.iter(|| lattice(d, true).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bary);
criterion_main!(benches);
