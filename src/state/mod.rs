//! Reachability store implementations.
//!
//! These modules implement [`ReachabilityState`](crate::traits::ReachabilityState)
//! for the two memory regimes the engine supports:
//! - [`dense`]  : one slot per admissible sum, scanned high-to-low.
//! - [`sparse`] : ordered map of reachable sums with staged commits.
//!
//! [`Strategy`] names the choice; `Strategy::Auto` defers it to
//! [`default_strategy`](crate::utils::default_strategy).

pub mod dense;
pub mod sparse;

pub use dense::DenseState;
pub use sparse::SparseState;

use std::fmt;

/// Which reachability store a solve call uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Pick from `capacity + slack` at call time.
    #[default]
    Auto,
    /// Fixed array of `capacity + slack + 1` slots.
    Dense,
    /// Map of reachable sums only.
    Sparse,
}

impl Strategy {
    /// Resolve `Auto` against the admissible limit; concrete choices pass through.
    pub fn resolve(self, limit: u64) -> Strategy {
        match self {
            Strategy::Auto => crate::utils::default_strategy(limit),
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Dense => "dense",
            Strategy::Sparse => "sparse",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Strategy;
    use crate::utils::DENSE_SLOT_LIMIT;

    #[test]
    fn concrete_strategies_pass_through() {
        assert_eq!(Strategy::Dense.resolve(u64::MAX - 1), Strategy::Dense);
        assert_eq!(Strategy::Sparse.resolve(0), Strategy::Sparse);
    }

    #[test]
    fn auto_switches_at_slot_limit() {
        assert_eq!(Strategy::Auto.resolve(DENSE_SLOT_LIMIT - 1), Strategy::Dense);
        assert_eq!(Strategy::Auto.resolve(DENSE_SLOT_LIMIT), Strategy::Sparse);
    }
}
