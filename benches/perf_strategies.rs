use approx_subsetsum::{SolverBuilder, Strategy};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_weights(rng: &mut StdRng, len: usize) -> Vec<u64> {
    (0..len).map(|_| rng.gen_range(1..1_000_000)).collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = sys.process(get_current_pid().unwrap()) {
        p.memory() / 1024
    } else {
        0
    }
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("subsetsum_strategies");
    for strategy in [Strategy::Dense, Strategy::Sparse] {
        for &(len, capacity) in &[(1_000usize, 10_000u64), (10_000, 50_000), (10_000, 300_000)] {
            group.bench_function(format!("{strategy}_n{len}_c{capacity}"), |b| {
                b.iter_batched(
                    || {
                        let mut rng = StdRng::seed_from_u64(42);
                        random_weights(&mut rng, len)
                    },
                    |weights| {
                        let before = rss_kib();
                        let solver = SolverBuilder::new(capacity)
                            .with_strategy(strategy)
                            .build()
                            .unwrap();
                        let selection = solver.solve(&weights).unwrap();
                        let after = rss_kib();
                        criterion::black_box(selection.selected_sum());
                        // record memory delta to stderr to avoid criterion noise
                        eprintln!(
                            "RSS KiB delta ({strategy} n={len} c={capacity}): {}",
                            after.saturating_sub(before)
                        );
                    },
                    BatchSize::PerIteration,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
