//! Configured entry point: ingestion, engine dispatch and result shaping.

use std::time::Duration;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::deadline::Clock;
use crate::engine::{Outcome, SubsetSumEngine};
use crate::error::SolveError;
use crate::ingest::{ingest, Weight};
use crate::result::{IndexOrder, InfeasiblePolicy, Selection};
use crate::state::{DenseState, SparseState, Strategy};

/// A validated solver configuration. Build one with
/// [`SolverBuilder`](crate::SolverBuilder).
///
/// A `Solver` holds no per-call state; every [`solve`](Self::solve) allocates
/// and drops its own reachability store, so one instance can serve any
/// number of calls, from any number of threads.
#[derive(Debug, Clone)]
pub struct Solver {
    pub(crate) capacity: u64,
    pub(crate) slack: u64,
    pub(crate) limit: u64,
    pub(crate) deadline: Option<Duration>,
    pub(crate) strategy: Strategy,
    pub(crate) order: IndexOrder,
    pub(crate) policy: InfeasiblePolicy,
}

impl Solver {
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn slack(&self) -> u64 {
        self.slack
    }

    /// `capacity + slack`.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Resolved strategy; never [`Strategy::Auto`].
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Convert `weights` to the sum domain and solve.
    pub fn solve<T: Weight>(&self, weights: &[T]) -> Result<Selection, SolveError> {
        let sums = ingest(weights)?;
        self.solve_sums(&sums)
    }

    /// Solve over weights already in the sum domain.
    pub fn solve_sums(&self, weights: &[u64]) -> Result<Selection, SolveError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "solve",
            n = weights.len(),
            capacity = self.capacity,
            slack = self.slack,
            strategy = %self.strategy
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if self.is_infeasible(weights) {
            #[cfg(feature = "tracing")]
            tracing::debug!(policy = ?self.policy, "every weight exceeds the limit");
            return match self.policy {
                InfeasiblePolicy::Error => Err(SolveError::Infeasible {
                    capacity: self.capacity,
                    slack: self.slack,
                }),
                InfeasiblePolicy::Empty => Ok(Selection::default()),
            };
        }

        let mut clock = Clock::start(self.deadline);
        let outcome = match self.strategy {
            Strategy::Sparse => self.run::<SparseState>(weights, &mut clock),
            Strategy::Dense | Strategy::Auto => self.run::<DenseState>(weights, &mut clock),
        };

        #[cfg(feature = "tracing")]
        if let Err(err) = &outcome {
            tracing::debug!(error = %err, checks = clock.checks(), "solve aborted");
        }

        let Outcome {
            selected_sum,
            mut picked,
        } = outcome?;
        if self.order == IndexOrder::Ascending {
            picked.reverse();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            selected_sum,
            picked = picked.len(),
            elapsed_us = clock.elapsed().as_micros() as u64,
            "solve complete"
        );

        Ok(Selection::new(picked, selected_sum))
    }

    fn run<S: crate::traits::ReachabilityState>(
        &self,
        weights: &[u64],
        clock: &mut Clock,
    ) -> Result<Outcome, SolveError> {
        SubsetSumEngine::<S>::new(weights, self.capacity, self.slack)?.run(clock)
    }

    fn is_infeasible(&self, weights: &[u64]) -> bool {
        self.capacity > 0 && !weights.is_empty() && weights.iter().all(|&w| w > self.limit)
    }

    /// Solve independent inputs, returning results in input order.
    ///
    /// Each input is solved single-threaded; with the `parallel` feature,
    /// distinct inputs run concurrently on the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn solve_batch<T: Weight + Sync>(
        &self,
        inputs: &[Vec<T>],
    ) -> Vec<Result<Selection, SolveError>> {
        inputs.par_iter().map(|w| self.solve(w)).collect()
    }

    /// Solve independent inputs, returning results in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn solve_batch<T: Weight>(&self, inputs: &[Vec<T>]) -> Vec<Result<Selection, SolveError>> {
        inputs.iter().map(|w| self.solve(w)).collect()
    }
}
