#![cfg(feature = "heavy")]
use std::time::Duration;

use approx_subsetsum::{SolverBuilder, Strategy};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_weights(rng: &mut StdRng, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.gen_range(1..1_000_000)).collect()
}

#[test]
fn heavy_stress_large_sample() {
    let mut rng = StdRng::seed_from_u64(123);
    let weights = random_weights(&mut rng, 100_000);
    let capacity = 300_000;
    let selection = SolverBuilder::new(capacity)
        .with_deadline(Duration::from_secs(60))
        .build()
        .unwrap()
        .solve(&weights)
        .unwrap();
    let total: u64 = selection.indices().iter().map(|&i| weights[i]).sum();
    assert_eq!(total, selection.selected_sum());
    assert!(total <= capacity);
}

#[test]
fn heavy_stress_sparse_window() {
    let mut rng = StdRng::seed_from_u64(7);
    let weights: Vec<u64> = (0..40).map(|_| rng.gen_range(1u64 << 30..1u64 << 34)).collect();
    let capacity = 1u64 << 36;
    let selection = SolverBuilder::new(capacity)
        .with_strategy(Strategy::Sparse)
        .build()
        .unwrap()
        .solve(&weights[..20])
        .unwrap();
    let total: u64 = selection.indices().iter().map(|&i| weights[i]).sum();
    assert_eq!(total, selection.selected_sum());
}
