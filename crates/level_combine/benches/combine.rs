mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use level_combine::prelude::{combine, CombineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn combine_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine/run");

    for &corpus_size in &[4usize, 16, 64] {
        let corpus: Vec<_> = (0..corpus_size)
            .map(|i| common::grid_level(&format!("level_{i}"), 24 + (i % 5) as i64, 12))
            .collect();
        let config = CombineConfig::default();
        group.throughput(common::elements_throughput(corpus_size));

        group.bench_with_input(
            BenchmarkId::from_parameter(corpus_size),
            &corpus_size,
            |b, _| {
                b.iter_batched(
                    || StdRng::seed_from_u64(0xC0FFEE),
                    |mut rng| {
                        let result = combine(&corpus, &config, &mut rng, &mut ())
                            .expect("valid config");
                        black_box(result)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = combine_benches
}
criterion_main!(benches);
