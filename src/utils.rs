//! Assorted utilities and helpers.

use crate::state::Strategy;

/// Largest slot count the dense strategy is auto-selected for (64 Mi slots).
pub const DENSE_SLOT_LIMIT: u64 = 1 << 26;

/// Pick a reachability strategy for sums in `0..=limit`.
///
/// This is the heuristic behind [`Strategy::Auto`]: the dense array wins on
/// speed as long as its `limit + 1` slots stay within [`DENSE_SLOT_LIMIT`];
/// beyond that the sparse map avoids allocating for sums that are never
/// reached.
#[inline]
pub fn default_strategy(limit: u64) -> Strategy {
    if limit < DENSE_SLOT_LIMIT {
        Strategy::Dense
    } else {
        Strategy::Sparse
    }
}

/// Number of dense slots needed for `limit`, if addressable on this target.
#[inline]
pub fn dense_slots(limit: u64) -> Option<usize> {
    usize::try_from(limit).ok()?.checked_add(1)
}
