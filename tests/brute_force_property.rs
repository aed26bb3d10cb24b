use approx_subsetsum::{SolveError, SolverBuilder, Strategy};
use proptest::prelude::*;

/// Best admissible sum by exhaustive enumeration of all 2^n subsets.
fn exhaustive_best(weights: &[u64], capacity: u64, slack: u64) -> u64 {
    let n = weights.len();
    let mut best = 0u64;
    for mask in 0u32..(1 << n) {
        let sum: u64 = (0..n)
            .filter(|&i| mask & (1 << i) != 0)
            .map(|i| weights[i])
            .sum();
        if sum > capacity + slack {
            continue;
        }
        let dist = sum.abs_diff(capacity);
        let best_dist = best.abs_diff(capacity);
        if dist < best_dist || (dist == best_dist && sum <= capacity && best > capacity) {
            best = sum;
        }
    }
    best
}

proptest! {
    #[test]
    fn matches_exhaustive_search(
        weights in prop::collection::vec(0u64..40, 0usize..12),
        capacity in 0u64..120,
        slack in 0u64..12,
        sparse in any::<bool>(),
    ) {
        let strategy = if sparse { Strategy::Sparse } else { Strategy::Dense };
        let solver = SolverBuilder::new(capacity)
            .with_slack(slack)
            .with_strategy(strategy)
            .build()
            .unwrap();
        let infeasible =
            capacity > 0 && !weights.is_empty() && weights.iter().all(|&w| w > capacity + slack);

        match solver.solve(&weights) {
            Err(SolveError::Infeasible { .. }) => prop_assert!(infeasible),
            Err(other) => prop_assert!(false, "unexpected error {other}"),
            Ok(selection) => {
                prop_assert!(!infeasible);
                let expected = exhaustive_best(&weights, capacity, slack);
                prop_assert_eq!(selection.selected_sum(), expected);

                let picked = selection.indices();
                prop_assert!(picked.iter().all(|&i| i < weights.len()));
                prop_assert!(picked.windows(2).all(|w| w[0] < w[1]));
                let total: u64 = picked.iter().map(|&i| weights[i]).sum();
                prop_assert_eq!(total, selection.selected_sum());
                if slack == 0 {
                    prop_assert!(total <= capacity);
                }
            }
        }
    }
}
