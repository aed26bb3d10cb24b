//! Core trait definitions for reachability stores.
//!
//! The DP engine never touches a concrete table. It talks to a
//! [`ReachabilityState`], which records for every admissible sum whether it
//! can be formed and which weight made it reachable first.
//!
//! Two strategies ship with the crate:
//! - [`DenseState`](crate::state::DenseState): one slot per sum in
//!   `0..=limit`, O(1) lookups, O(limit) memory.
//! - [`SparseState`](crate::state::SparseState): an ordered map holding only
//!   reachable sums, memory proportional to what is actually reachable.
//!
//! Both obey the same conflict rule: a sum is assigned a predecessor at most
//! once, and later writers never overwrite it.

use crate::deadline::Clock;
use crate::error::SolveError;

/// How a reachable sum was formed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predecessor {
    /// Sum 0, reached by the empty subset.
    Base,
    /// Reached by adding the weight at this index to a previously reachable sum.
    Index(usize),
}

impl Predecessor {
    /// Index of the weight, or `None` for the base sentinel.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Predecessor::Base => None,
            Predecessor::Index(i) => Some(i),
        }
    }
}

/// Store mapping achievable sums to the weight that first reached them.
///
/// Semantics:
/// - A freshly constructed state has exactly one reachable sum, `0`, whose
///   predecessor is [`Predecessor::Base`].
/// - Sums live in `0..=limit()`; anything above the limit is never reachable.
/// - `try_mark` is first-writer-wins.
/// - [`absorb`](Self::absorb) is the only operation that mixes reads and
///   writes; it must behave as if it read the state as it was *before* the
///   weight was seen, so a single weight never contributes twice.
pub trait ReachabilityState {
    /// Largest number of weights whose indices this store can record.
    const MAX_WEIGHTS: usize = usize::MAX;

    /// Create an empty state admitting sums in `0..=limit`.
    ///
    /// Fails when the store for this window cannot be allocated.
    fn with_limit(limit: u64) -> Result<Self, SolveError>
    where
        Self: Sized;

    /// Largest admissible sum (`capacity + slack`).
    fn limit(&self) -> u64;

    /// Mark `sum` as reachable via `index` if it is not reachable yet.
    ///
    /// Returns `true` when the marking happened. Sums above the limit, and
    /// indices at or beyond [`MAX_WEIGHTS`](Self::MAX_WEIGHTS), are rejected
    /// and return `false`.
    fn try_mark(&mut self, sum: u64, index: usize) -> bool;

    /// Predecessor link of `sum`, or `None` if it is unreachable.
    fn predecessor_of(&self, sum: u64) -> Option<Predecessor>;

    /// Whether `sum` has been reached.
    #[inline]
    fn is_reachable(&self, sum: u64) -> bool {
        self.predecessor_of(sum).is_some()
    }

    /// Number of reachable sums, including 0.
    fn reachable_count(&self) -> usize;

    /// Add weight `weight` (at position `index`) to every previously
    /// reachable sum that stays within the limit.
    ///
    /// Implementations report progress to `clock` in sum units and propagate
    /// a timeout as soon as the clock reports one.
    fn absorb(&mut self, index: usize, weight: u64, clock: &mut Clock) -> Result<(), SolveError>;

    /// Largest reachable sum in `0..=ceiling`.
    ///
    /// Always `Some` for a well-formed state, since 0 is reachable.
    fn highest_at_or_below(&self, ceiling: u64) -> Option<u64>;

    /// Smallest reachable sum in `floor..=ceiling`, if any.
    fn lowest_within(&self, floor: u64, ceiling: u64) -> Option<u64>;
}
