//! Predecessor walk from a selected sum back to the empty subset.
//!
//! Each step looks up the weight that first reached the current sum, records
//! its index and subtracts its value. Because a sum is only ever claimed by a
//! weight processed after everything that formed the remainder, the indices
//! come out strictly decreasing, hence distinct.

use crate::deadline::Clock;
use crate::error::{Phase, SolveError};
use crate::traits::{Predecessor, ReachabilityState};

/// Reconstruct the indices forming `target`, most recently added first.
///
/// Returns `None` if the chain is broken (a sum on the walk is unreachable
/// or its predecessor does not fit), which cannot happen for a state filled
/// by the engine from the same `weights`.
pub fn backtrack<S: ReachabilityState>(
    state: &S,
    weights: &[u64],
    target: u64,
    clock: &mut Clock,
) -> Result<Option<Vec<usize>>, SolveError> {
    clock.enter(Phase::Backtrack);
    clock.check()?;

    let mut picked = Vec::new();
    let mut sum = target;
    loop {
        match state.predecessor_of(sum) {
            Some(Predecessor::Base) => return Ok(Some(picked)),
            Some(Predecessor::Index(i)) => {
                let Some(rest) = weights.get(i).and_then(|&w| sum.checked_sub(w)) else {
                    return Ok(None);
                };
                if rest == sum {
                    return Ok(None);
                }
                picked.push(i);
                sum = rest;
            }
            None => return Ok(None),
        }
        clock.advance(1)?;
    }
}
