//! Dense array reachability store.
//!
//! One 32-bit slot per sum in `0..=limit`. A slot holds either the index of
//! the first weight that reached it, a base marker for sum 0, or nothing, so
//! the store indexes at most `u32::MAX - 1` weights.
//! Absorbing a weight scans candidate sums from high to low, so the read of
//! `s - w` always sees the state from before this weight: the slot it reads
//! has not been visited yet in the current pass.

use crate::deadline::{Clock, CHECK_INTERVAL};
use crate::error::SolveError;
use crate::traits::{Predecessor, ReachabilityState};
use crate::utils::dense_slots;

const UNREACHABLE: u32 = u32::MAX;
const BASE: u32 = u32::MAX - 1;

#[derive(Clone, Debug)]
pub struct DenseState {
    slots: Vec<u32>,
    /// Upper bound on the largest reachable sum; scans never go above it.
    frontier: usize,
    reachable: usize,
}

impl DenseState {
    #[inline]
    fn decode(slot: u32) -> Option<Predecessor> {
        match slot {
            UNREACHABLE => None,
            BASE => Some(Predecessor::Base),
            i => Some(Predecessor::Index(i as usize)),
        }
    }

    /// Slot encoding of weight `index`, if it stays clear of the sentinels.
    #[inline]
    fn tag(index: usize) -> Option<u32> {
        u32::try_from(index).ok().filter(|&t| t < BASE)
    }

    #[inline]
    fn top(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    fn slot(&self, sum: u64) -> Option<u32> {
        let s = usize::try_from(sum).ok()?;
        self.slots.get(s).copied()
    }
}

impl ReachabilityState for DenseState {
    const MAX_WEIGHTS: usize = BASE as usize;

    /// # Errors
    /// [`SolveError::DenseAllocation`] if `limit + 1` slots are not
    /// addressable on this target or the allocator refuses them.
    fn with_limit(limit: u64) -> Result<Self, SolveError> {
        let refused = SolveError::DenseAllocation { limit };
        let len = dense_slots(limit).ok_or(refused.clone())?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(len).map_err(|_| refused)?;
        slots.resize(len, UNREACHABLE);
        slots[0] = BASE;
        Ok(Self {
            slots,
            frontier: 0,
            reachable: 1,
        })
    }

    fn limit(&self) -> u64 {
        self.top() as u64
    }

    fn try_mark(&mut self, sum: u64, index: usize) -> bool {
        let (Ok(s), Some(tag)) = (usize::try_from(sum), Self::tag(index)) else {
            return false;
        };
        match self.slots.get_mut(s) {
            Some(slot) if *slot == UNREACHABLE => {
                *slot = tag;
                self.reachable += 1;
                self.frontier = self.frontier.max(s);
                true
            }
            _ => false,
        }
    }

    fn predecessor_of(&self, sum: u64) -> Option<Predecessor> {
        self.slot(sum).and_then(Self::decode)
    }

    fn reachable_count(&self) -> usize {
        self.reachable
    }

    fn absorb(&mut self, index: usize, weight: u64, clock: &mut Clock) -> Result<(), SolveError> {
        let top = self.top();
        let w = match usize::try_from(weight) {
            Ok(w) if w <= top => w,
            _ => return Ok(()),
        };
        if w == 0 {
            return clock.advance(1);
        }
        let tag = Self::tag(index).ok_or(SolveError::TooManyWeights {
            count: index.saturating_add(1),
            max: Self::MAX_WEIGHTS,
        })?;

        let chunk = CHECK_INTERVAL as usize;
        let mut hi = self.frontier.saturating_add(w).min(top);
        let mut new_frontier = self.frontier;
        loop {
            let lo = hi.saturating_sub(chunk - 1).max(w);
            for s in (lo..=hi).rev() {
                if self.slots[s] == UNREACHABLE && self.slots[s - w] != UNREACHABLE {
                    self.slots[s] = tag;
                    self.reachable += 1;
                    new_frontier = new_frontier.max(s);
                }
            }
            clock.advance((hi - lo + 1) as u64)?;
            if lo == w {
                break;
            }
            hi = lo - 1;
        }
        self.frontier = new_frontier;
        Ok(())
    }

    fn highest_at_or_below(&self, ceiling: u64) -> Option<u64> {
        let c = usize::try_from(ceiling)
            .unwrap_or(usize::MAX)
            .min(self.frontier);
        (0..=c)
            .rev()
            .find(|&s| self.slots[s] != UNREACHABLE)
            .map(|s| s as u64)
    }

    fn lowest_within(&self, floor: u64, ceiling: u64) -> Option<u64> {
        let lo = usize::try_from(floor).ok()?;
        let hi = usize::try_from(ceiling).map_or(self.top(), |c| c.min(self.top()));
        if lo > hi {
            return None;
        }
        (lo..=hi)
            .find(|&s| self.slots[s] != UNREACHABLE)
            .map(|s| s as u64)
    }
}
