//! Subset-sum reachability engine.
//!
//! This module runs the three phases of a solve call over one
//! [`ReachabilityState`]:
//! 1. A single forward pass over the weights that records, for every
//!    admissible sum, the first weight that made it reachable.
//! 2. Target selection: the reachable sum closest to the capacity.
//! 3. A backtracking walk from that sum to 0 over predecessor links.
//!
//! The engine is generic over the store, so the dense and sparse strategies
//! share every line of orchestration. It works in the `u64` sum domain;
//! conversion of caller data happens in [`crate::ingest`].

use crate::backtrack::backtrack;
use crate::deadline::Clock;
use crate::error::{Phase, SolveError};
use crate::selector::select_target;
use crate::traits::ReachabilityState;

/// Sum chosen by a run and the indices forming it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub selected_sum: u64,
    /// Indices in reconstruction order: strictly decreasing.
    pub picked: Vec<usize>,
}

/// Reachability engine for one weight sequence and one capacity window.
///
/// Typical usage:
/// ```
/// use approx_subsetsum::deadline::Clock;
/// use approx_subsetsum::engine::SubsetSumEngine;
/// use approx_subsetsum::state::DenseState;
///
/// let weights = [3, 34, 4, 12, 5, 2];
/// let engine = SubsetSumEngine::<DenseState>::new(&weights, 9, 0).unwrap();
/// let outcome = engine.run(&mut Clock::unbounded()).unwrap();
/// assert_eq!(outcome.selected_sum, 9);
/// let total: u64 = outcome.picked.iter().map(|&i| weights[i]).sum();
/// assert_eq!(total, 9);
/// ```
pub struct SubsetSumEngine<'w, S: ReachabilityState> {
    weights: &'w [u64],
    capacity: u64,
    slack: u64,
    state: S,
}

impl<'w, S: ReachabilityState> SubsetSumEngine<'w, S> {
    /// Create an engine with an empty store admitting `0..=capacity + slack`.
    ///
    /// # Errors
    /// - [`SolveError::CapacityOverflow`] if `capacity + slack` overflows `u64`.
    /// - [`SolveError::TooManyWeights`] if the store cannot index every weight.
    /// - Whatever [`ReachabilityState::with_limit`] reports, e.g.
    ///   [`SolveError::DenseAllocation`].
    pub fn new(weights: &'w [u64], capacity: u64, slack: u64) -> Result<Self, SolveError> {
        let limit = capacity
            .checked_add(slack)
            .ok_or(SolveError::CapacityOverflow { capacity, slack })?;
        if weights.len() > S::MAX_WEIGHTS {
            return Err(SolveError::TooManyWeights {
                count: weights.len(),
                max: S::MAX_WEIGHTS,
            });
        }
        Ok(Self {
            weights,
            capacity,
            slack,
            state: S::with_limit(limit)?,
        })
    }

    /// Largest admissible sum.
    pub fn limit(&self) -> u64 {
        self.state.limit()
    }

    /// Expose the store, e.g. to inspect it after [`fill`](Self::fill).
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Phase I: absorb every weight in index order.
    ///
    /// Weights above the limit are skipped. The pass stops early once the
    /// capacity itself is reachable: nothing can beat distance zero, and later
    /// weights never rewrite an existing predecessor, so the result is the
    /// same as for a full pass.
    pub fn fill(&mut self, clock: &mut Clock) -> Result<(), SolveError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("fill", n = self.weights.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        clock.enter(Phase::Fill);
        if self.weights.is_empty() {
            return Ok(());
        }
        clock.check()?;

        let limit = self.state.limit();
        for (i, &w) in self.weights.iter().enumerate() {
            if w > limit {
                clock.advance(1)?;
                continue;
            }
            self.state.absorb(i, w, clock)?;
            if self.state.is_reachable(self.capacity) {
                #[cfg(feature = "tracing")]
                tracing::trace!(index = i, "capacity reached, stopping early");
                break;
            }
        }

        clock.check()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(reachable = self.state.reachable_count(), "fill complete");
        Ok(())
    }

    /// Phase II: pick the admissible sum closest to the capacity.
    pub fn select(&self) -> u64 {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("select").entered();

        select_target(&self.state, self.capacity, self.slack)
            .expect("sum 0 is always reachable")
    }

    /// Run all phases and return the selected sum with its indices.
    pub fn run(mut self, clock: &mut Clock) -> Result<Outcome, SolveError> {
        self.fill(clock)?;
        let selected_sum = self.select();
        if selected_sum == 0 {
            return Ok(Outcome {
                selected_sum,
                picked: Vec::new(),
            });
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("backtrack", selected_sum);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let picked = backtrack(&self.state, self.weights, selected_sum, clock)?
            .expect("engine-filled state always walks back to 0");
        Ok(Outcome {
            selected_sum,
            picked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DenseState, SparseState};
    use crate::traits::Predecessor;
    use std::time::Duration;

    /// Sparse store that only indexes two weights.
    struct TwoSlotIndex(SparseState);

    impl ReachabilityState for TwoSlotIndex {
        const MAX_WEIGHTS: usize = 2;

        fn with_limit(limit: u64) -> Result<Self, SolveError> {
            SparseState::with_limit(limit).map(Self)
        }
        fn limit(&self) -> u64 {
            self.0.limit()
        }
        fn try_mark(&mut self, sum: u64, index: usize) -> bool {
            index < Self::MAX_WEIGHTS && self.0.try_mark(sum, index)
        }
        fn predecessor_of(&self, sum: u64) -> Option<Predecessor> {
            self.0.predecessor_of(sum)
        }
        fn reachable_count(&self) -> usize {
            self.0.reachable_count()
        }
        fn absorb(&mut self, index: usize, weight: u64, clock: &mut Clock) -> Result<(), SolveError> {
            self.0.absorb(index, weight, clock)
        }
        fn highest_at_or_below(&self, ceiling: u64) -> Option<u64> {
            self.0.highest_at_or_below(ceiling)
        }
        fn lowest_within(&self, floor: u64, ceiling: u64) -> Option<u64> {
            self.0.lowest_within(floor, ceiling)
        }
    }

    fn run<S: ReachabilityState>(weights: &[u64], capacity: u64, slack: u64) -> Outcome {
        SubsetSumEngine::<S>::new(weights, capacity, slack)
            .unwrap()
            .run(&mut Clock::unbounded())
            .unwrap()
    }

    #[test]
    fn new_rejects_overflowing_window() {
        let err = SubsetSumEngine::<SparseState>::new(&[], u64::MAX, 1)
            .err()
            .unwrap();
        assert_eq!(
            err,
            SolveError::CapacityOverflow {
                capacity: u64::MAX,
                slack: 1
            }
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn new_reports_unaddressable_dense_window() {
        let err = SubsetSumEngine::<DenseState>::new(&[], u64::MAX, 0)
            .err()
            .unwrap();
        assert_eq!(err, SolveError::DenseAllocation { limit: u64::MAX });
    }

    #[test]
    fn new_rejects_more_weights_than_the_store_indexes() {
        let fits = SubsetSumEngine::<TwoSlotIndex>::new(&[1, 2], 3, 0)
            .unwrap()
            .run(&mut Clock::unbounded())
            .unwrap();
        assert_eq!(fits.selected_sum, 3);

        let err = SubsetSumEngine::<TwoSlotIndex>::new(&[1, 2, 3], 3, 0)
            .err()
            .unwrap();
        assert_eq!(err, SolveError::TooManyWeights { count: 3, max: 2 });
    }

    #[test]
    fn classic_instance_hits_capacity() {
        let weights = [3, 34, 4, 12, 5, 2];
        for outcome in [run::<DenseState>(&weights, 9, 0), run::<SparseState>(&weights, 9, 0)] {
            assert_eq!(outcome.selected_sum, 9);
            let total: u64 = outcome.picked.iter().map(|&i| weights[i]).sum();
            assert_eq!(total, 9);
        }
    }

    #[test]
    fn early_stop_keeps_first_writer_result() {
        let weights = [4, 5, 9, 1, 8];
        let outcome = run::<DenseState>(&weights, 9, 0);
        // 9 is first reached by weights 0 and 1; weight 2 never gets a say.
        assert_eq!(outcome.picked, vec![1, 0]);
    }

    #[test]
    fn fill_skips_oversized_weights() {
        let weights = [50, 2, 60];
        let mut engine = SubsetSumEngine::<DenseState>::new(&weights, 5, 1).unwrap();
        engine.fill(&mut Clock::unbounded()).unwrap();
        assert_eq!(engine.limit(), 6);
        assert_eq!(engine.state().reachable_count(), 2);
        assert_eq!(engine.select(), 2);
    }

    #[test]
    fn slack_reaches_above_capacity() {
        let outcome = run::<SparseState>(&[10], 8, 5);
        assert_eq!(outcome.selected_sum, 10);
        assert_eq!(outcome.picked, vec![0]);
    }

    #[test]
    fn zero_deadline_times_out_in_fill() {
        let weights = [1, 2, 3];
        let engine = SubsetSumEngine::<DenseState>::new(&weights, 4, 0).unwrap();
        let err = engine
            .run(&mut Clock::start(Some(Duration::ZERO)))
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::Timeout {
                phase: Phase::Fill,
                ..
            }
        ));
    }

    #[test]
    fn empty_weights_are_trivial_even_with_zero_deadline() {
        let engine = SubsetSumEngine::<DenseState>::new(&[], 100, 0).unwrap();
        let outcome = engine.run(&mut Clock::start(Some(Duration::ZERO))).unwrap();
        assert_eq!(outcome.selected_sum, 0);
        assert!(outcome.picked.is_empty());
    }
}
