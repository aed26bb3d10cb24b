//! Benchmark: wide capacity windows, where no exact hit stops the pass early.
//!
//! Run with:
//! `cargo bench --bench large_capacity`
//!
//! Even weights against an odd capacity force a full pass, which is the
//! worst case for both strategies.

use approx_subsetsum::{SolverBuilder, Strategy};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn even_weights(rng: &mut StdRng, len: usize) -> Vec<u64> {
    (0..len).map(|_| 2 * rng.gen_range(1..50_000)).collect()
}

fn bench_large_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("subsetsum_large_capacity");
    group.sample_size(10);

    // Example sizes; tune as needed for your machine.
    for &capacity in &[100_001u64, 1_000_001, 4_000_001] {
        group.bench_function(format!("dense_c{capacity}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    even_weights(&mut rng, 2_000)
                },
                |weights| {
                    let solver = SolverBuilder::new(capacity)
                        .with_strategy(Strategy::Dense)
                        .build()
                        .unwrap();
                    criterion::black_box(solver.solve(&weights).unwrap().selected_sum());
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_large_capacity);
criterion_main!(benches);
