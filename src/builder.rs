use std::time::Duration;

use crate::error::SolveError;
use crate::result::{IndexOrder, InfeasiblePolicy};
use crate::solver::Solver;
use crate::state::Strategy;
use crate::utils::dense_slots;

/// Configuration for a [`Solver`].
///
/// Defaults: no slack, no deadline, [`Strategy::Auto`],
/// [`IndexOrder::Ascending`], [`InfeasiblePolicy::Error`].
///
/// ```
/// use std::time::Duration;
/// use approx_subsetsum::{SolverBuilder, Strategy};
///
/// let solver = SolverBuilder::new(100)
///     .with_slack(5)
///     .with_deadline(Duration::from_secs(10))
///     .with_strategy(Strategy::Sparse)
///     .build()
///     .unwrap();
/// assert_eq!(solver.limit(), 105);
/// ```
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    capacity: u64,
    slack: u64,
    deadline: Option<Duration>,
    strategy: Strategy,
    order: IndexOrder,
    policy: InfeasiblePolicy,
}

impl SolverBuilder {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            slack: 0,
            deadline: None,
            strategy: Strategy::Auto,
            order: IndexOrder::Ascending,
            policy: InfeasiblePolicy::Error,
        }
    }
    pub fn with_slack(mut self, slack: u64) -> Self {
        self.slack = slack;
        self
    }
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
    /// Like [`with_deadline`](Self::with_deadline), but `None` clears it.
    pub fn with_optional_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
    pub fn with_order(mut self, order: IndexOrder) -> Self {
        self.order = order;
        self
    }
    pub fn with_infeasible_policy(mut self, policy: InfeasiblePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate the window and resolve the strategy.
    ///
    /// # Errors
    /// [`SolveError::CapacityOverflow`] if `capacity + slack` overflows, or if
    /// the dense strategy was requested for more slots than this target can
    /// address. An addressable dense window is only allocated per call; if
    /// the allocator refuses it, the call fails with
    /// [`SolveError::DenseAllocation`].
    pub fn build(self) -> Result<Solver, SolveError> {
        let overflow = SolveError::CapacityOverflow {
            capacity: self.capacity,
            slack: self.slack,
        };
        let limit = self.capacity.checked_add(self.slack).ok_or(overflow.clone())?;
        let strategy = self.strategy.resolve(limit);
        if strategy == Strategy::Dense && dense_slots(limit).is_none() {
            return Err(overflow);
        }
        Ok(Solver {
            capacity: self.capacity,
            slack: self.slack,
            limit,
            deadline: self.deadline,
            strategy,
            order: self.order,
            policy: self.policy,
        })
    }
}
