mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use level_combine::prelude::Offset;

fn collision_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("level/collides");

    for &side in &[8i64, 32, 128] {
        let acc = common::grid_level("acc", side, side);
        let piece = common::grid_level("piece", side / 2, side / 2);
        let n = (side * side) as usize;
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::new("hit", side), &side, |b, _| {
            b.iter(|| black_box(acc.collides(&piece, Offset::new(1, 1))));
        });

        group.bench_with_input(BenchmarkId::new("miss", side), &side, |b, &s| {
            b.iter(|| black_box(acc.collides(&piece, Offset::new(s, s))));
        });
    }

    group.finish();
}

fn rotate_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("level/rotate");

    for &side in &[8i64, 64, 256] {
        let level = common::grid_level("rot", side, side);
        group.throughput(common::elements_throughput((side * side) as usize));
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter_batched(
                || level.clone(),
                |mut l| {
                    l.rotate();
                    black_box(l)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = collision_benches, rotate_benches
}
criterion_main!(benches);
