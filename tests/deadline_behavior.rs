use std::time::Duration;

use approx_subsetsum::{solve, ErrorKind, Phase, SolveError, SolverBuilder, Strategy};

/// Even weights against an odd capacity: the capacity is never hit exactly,
/// so the fill pass cannot stop early.
fn slow_instance() -> (Vec<u64>, u64) {
    let weights = (0..4000u64).map(|i| 1000 + 2 * (i % 1000)).collect();
    (weights, 4_000_001)
}

#[test]
fn zero_deadline_times_out_before_any_result() {
    let err = solve(&[1u64, 2, 3], 5, 0, Some(Duration::ZERO)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(matches!(
        err,
        SolveError::Timeout {
            phase: Phase::Fill,
            ..
        }
    ));
}

#[test]
fn zero_deadline_on_trivial_input_still_succeeds() {
    let empty: [u64; 0] = [];
    assert!(solve(&empty, 5, 0, Some(Duration::ZERO)).unwrap().is_empty());
}

#[test]
fn generous_deadline_matches_unbounded_run() {
    let weights: Vec<u64> = (1..=300).collect();
    let bounded = solve(&weights, 10_007, 0, Some(Duration::from_secs(600))).unwrap();
    let unbounded = solve(&weights, 10_007, 0, None).unwrap();
    assert_eq!(bounded, unbounded);
}

#[test]
fn long_dense_pass_is_cut_short() {
    let (weights, capacity) = slow_instance();
    let err = SolverBuilder::new(capacity)
        .with_strategy(Strategy::Dense)
        .with_deadline(Duration::from_millis(5))
        .build()
        .unwrap()
        .solve(&weights)
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[test]
fn long_sparse_pass_is_cut_short() {
    let (weights, capacity) = slow_instance();
    let err = SolverBuilder::new(capacity)
        .with_strategy(Strategy::Sparse)
        .with_deadline(Duration::from_millis(5))
        .build()
        .unwrap()
        .solve(&weights)
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[test]
fn infeasible_is_not_reported_as_timeout() {
    let err = solve(&[50u64, 60], 10, 0, Some(Duration::from_secs(60))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Infeasible);
}

#[test]
fn infeasibility_is_decided_before_the_clock_starts() {
    let err = solve(&[5u64, 5, 5], 4, 0, Some(Duration::ZERO)).unwrap_err();
    assert_eq!(
        err,
        SolveError::Infeasible {
            capacity: 4,
            slack: 0
        }
    );
}
