//! Sparse map reachability store.
//!
//! Only reachable sums are stored, in an ordered map, so memory follows the
//! number of distinct subset sums rather than the capacity. Iterating the map
//! while inserting into it would let a weight build on sums it created
//! itself; new sums for one weight are therefore collected into a staging
//! buffer during the scan and committed once the scan is complete.
//!
//! The ordered map also makes the nearest-sum queries used by target
//! selection logarithmic instead of linear in the capacity.

use std::collections::BTreeMap;

use crate::deadline::Clock;
use crate::error::SolveError;
use crate::traits::{Predecessor, ReachabilityState};

#[derive(Clone, Debug)]
pub struct SparseState {
    sums: BTreeMap<u64, Predecessor>,
    staging: Vec<u64>,
    limit: u64,
}

impl SparseState {
    /// Iterate reachable sums in ascending order with their predecessors.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Predecessor)> + '_ {
        self.sums.iter().map(|(&s, &p)| (s, p))
    }
}

impl ReachabilityState for SparseState {
    fn with_limit(limit: u64) -> Result<Self, SolveError> {
        let mut sums = BTreeMap::new();
        sums.insert(0, Predecessor::Base);
        Ok(Self {
            sums,
            staging: Vec::new(),
            limit,
        })
    }

    fn limit(&self) -> u64 {
        self.limit
    }

    fn try_mark(&mut self, sum: u64, index: usize) -> bool {
        if sum > self.limit || self.sums.contains_key(&sum) {
            return false;
        }
        self.sums.insert(sum, Predecessor::Index(index));
        true
    }

    fn predecessor_of(&self, sum: u64) -> Option<Predecessor> {
        self.sums.get(&sum).copied()
    }

    fn reachable_count(&self) -> usize {
        self.sums.len()
    }

    fn absorb(&mut self, index: usize, weight: u64, clock: &mut Clock) -> Result<(), SolveError> {
        if weight > self.limit {
            return Ok(());
        }
        if weight == 0 {
            return clock.advance(1);
        }

        let ceiling = self.limit - weight;
        self.staging.clear();
        for &s in self.sums.range(..=ceiling).map(|(s, _)| s) {
            let target = s + weight;
            if !self.sums.contains_key(&target) {
                self.staging.push(target);
            }
            clock.advance(1)?;
        }

        for target in self.staging.drain(..) {
            self.sums.entry(target).or_insert(Predecessor::Index(index));
        }
        Ok(())
    }

    fn highest_at_or_below(&self, ceiling: u64) -> Option<u64> {
        self.sums.range(..=ceiling).next_back().map(|(&s, _)| s)
    }

    fn lowest_within(&self, floor: u64, ceiling: u64) -> Option<u64> {
        if floor > ceiling {
            return None;
        }
        self.sums.range(floor..=ceiling).next().map(|(&s, _)| s)
    }
}
