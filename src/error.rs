//! Error types for subset-sum selection.

use std::fmt;
use std::time::Duration;

/// Stage of a solve call, reported when a deadline fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reachability pass over the weights.
    Fill,
    /// Predecessor walk from the selected sum back to 0.
    Backtrack,
}

impl Phase {
    /// Lower-case label used in messages and trace fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Fill => "fill",
            Phase::Backtrack => "backtrack",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`SolveError`].
///
/// Callers bridging into another error model usually only need to branch on
/// this, not on the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The inputs were rejected before any DP work started.
    InvalidInput,
    /// No non-empty subset fits within `capacity + slack`.
    Infeasible,
    /// The deadline elapsed.
    Timeout,
}

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// Returned when a weight cannot be converted to the integral sum domain.
    #[error("invalid weight at index {index}: {reason}")]
    InvalidInput {
        /// Position of the first offending element.
        index: usize,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Returned when `capacity + slack` does not fit the sum domain.
    #[error("capacity {capacity} plus slack {slack} overflows the sum domain")]
    CapacityOverflow {
        /// Requested capacity.
        capacity: u64,
        /// Requested slack.
        slack: u64,
    },

    /// Returned when the dense store for sums up to `limit` cannot be
    /// allocated.
    #[error("dense store for sums up to {limit} cannot be allocated")]
    DenseAllocation {
        /// Largest admissible sum of the rejected window.
        limit: u64,
    },

    /// Returned when the store cannot record indices for this many weights.
    #[error("{count} weights exceed the {max} the reachability store can index")]
    TooManyWeights {
        /// Number of weights supplied.
        count: usize,
        /// Largest count the store supports.
        max: usize,
    },

    /// Returned when every weight exceeds `capacity + slack`.
    #[error("no subset fits: every weight exceeds capacity {capacity} plus slack {slack}")]
    Infeasible {
        /// Requested capacity.
        capacity: u64,
        /// Requested slack.
        slack: u64,
    },

    /// Returned when the deadline elapsed before a result was produced.
    #[error("deadline of {budget:?} exceeded during {phase} after {elapsed:?}")]
    Timeout {
        /// Phase running when the check fired.
        phase: Phase,
        /// Configured budget.
        budget: Duration,
        /// Time spent when the check fired.
        elapsed: Duration,
    },
}

impl SolveError {
    /// Map onto the three-way error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolveError::InvalidInput { .. }
            | SolveError::CapacityOverflow { .. }
            | SolveError::DenseAllocation { .. }
            | SolveError::TooManyWeights { .. } => ErrorKind::InvalidInput,
            SolveError::Infeasible { .. } => ErrorKind::Infeasible,
            SolveError::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    /// Shorthand for `kind() == ErrorKind::Timeout`.
    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}
