#![cfg(feature = "parallel")]

use approx_subsetsum::SolverBuilder;
use proptest::prelude::*;

proptest! {
    #[test]
    fn batch_matches_one_by_one(
        inputs in prop::collection::vec(prop::collection::vec(1u32..200, 0usize..40), 0usize..16),
        capacity in 0u64..1500,
        slack in 0u64..20,
    ) {
        let solver = SolverBuilder::new(capacity).with_slack(slack).build().unwrap();
        let batch = solver.solve_batch(&inputs);
        prop_assert_eq!(batch.len(), inputs.len());
        for (input, result) in inputs.iter().zip(batch) {
            prop_assert_eq!(result, solver.solve(input));
        }
    }
}
