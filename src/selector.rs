//! Target selection over a populated reachability store.
//!
//! Candidates are ranked by distance from the capacity. At equal distance the
//! sum at or below capacity wins, and sums above capacity are only considered
//! when slack allows them. This is the outward scan
//! `cap, cap-1, cap+1, cap-2, cap+2, ...` expressed as two nearest-neighbour
//! queries, which lets the sparse store answer in logarithmic time.

use crate::traits::ReachabilityState;

/// Pick the admissible reachable sum closest to `capacity`.
///
/// Returns `None` only if sum 0 is missing from the store, which a store
/// built through [`ReachabilityState::with_limit`] never allows.
pub fn select_target<S: ReachabilityState>(state: &S, capacity: u64, slack: u64) -> Option<u64> {
    let below = state.highest_at_or_below(capacity);
    let above = if slack == 0 {
        None
    } else {
        let ceiling = capacity.saturating_add(slack).min(state.limit());
        capacity
            .checked_add(1)
            .and_then(|floor| state.lowest_within(floor, ceiling))
    };

    match (below, above) {
        (Some(b), Some(a)) => {
            if a - capacity < capacity - b {
                Some(a)
            } else {
                Some(b)
            }
        }
        (Some(b), None) => Some(b),
        (None, above) => above,
    }
}
