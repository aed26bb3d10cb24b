//! Closest-to-capacity subset-sum selection.
//!
//! Given an ordered sequence of non-negative weights and a capacity, this
//! crate finds a subset (by index) whose sum is as close as possible to the
//! capacity without exceeding it, or, with *slack*, within a bounded overshoot
//! above it.
//!
//! ## Core idea
//! 1. Ingest the caller's numbers into an integral sum domain ([`ingest`]).
//! 2. Run a 0/1 reachability DP that remembers, for every admissible sum, the
//!    first weight that made it reachable ([`engine`]).
//! 3. Pick the reachable sum closest to the capacity ([`selector`]) and walk
//!    predecessor links back to 0 ([`backtrack`]).
//!
//! The reachability store is pluggable through [`ReachabilityState`]:
//! a dense array when `capacity + slack` is moderate, a sparse ordered map when
//! it is huge but few sums are actually reachable. Every call can carry a
//! cooperative deadline, polled at a bounded granularity during both the DP
//! pass and the backtracking walk.
//!
//! ## Quick start
//! ```
//! use approx_subsetsum::solve;
//!
//! let weights = [3u32, 34, 4, 12, 5, 2];
//! let picked = solve(&weights, 9, 0, None).unwrap();
//! let total: u32 = picked.iter().map(|&i| weights[i]).sum();
//! assert_eq!(total, 9);
//! ```
//!
//! For anything beyond the defaults (strategy, index order, infeasibility
//! policy), configure a [`Solver`] through [`SolverBuilder`].

use std::time::Duration;

pub mod backtrack;
pub mod builder;
pub mod deadline;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod result;
pub mod selector;
pub mod solver;
pub mod state;
pub mod traits;
pub mod utils;

pub use crate::builder::SolverBuilder;
pub use crate::engine::SubsetSumEngine;
pub use crate::error::{ErrorKind, Phase, SolveError};
pub use crate::ingest::Weight;
pub use crate::result::{IndexOrder, InfeasiblePolicy, Selection};
pub use crate::solver::Solver;
pub use crate::state::{DenseState, SparseState, Strategy};
pub use crate::traits::{Predecessor, ReachabilityState};

/// Select indices of `weights` whose sum is closest to `capacity`.
///
/// Sums up to `capacity + slack` are admissible; at equal distance a sum at
/// or below the capacity is preferred. Indices are returned in ascending
/// order. With `deadline` set, the call fails with
/// [`SolveError::Timeout`] once that much wall-clock time has elapsed.
///
/// # Errors
/// - [`SolveError::InvalidInput`] for negative or non-finite weights.
/// - [`SolveError::CapacityOverflow`] if `capacity + slack` overflows.
/// - [`SolveError::DenseAllocation`] if the dense store cannot be allocated.
/// - [`SolveError::Infeasible`] if every weight exceeds `capacity + slack`
///   (and both the input and the capacity are non-empty/non-zero).
/// - [`SolveError::Timeout`] if the deadline elapsed.
pub fn solve<T: Weight>(
    weights: &[T],
    capacity: u64,
    slack: u64,
    deadline: Option<Duration>,
) -> Result<Vec<usize>, SolveError> {
    SolverBuilder::new(capacity)
        .with_slack(slack)
        .with_optional_deadline(deadline)
        .build()?
        .solve(weights)
        .map(Selection::into_indices)
}
