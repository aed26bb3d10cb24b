//! Cooperative deadline polling.
//!
//! Reading the wall clock on every inner-loop step would dominate the DP, so
//! callers report work in abstract units (sum slots scanned, predecessor links
//! followed) and the clock only consults [`Instant::now`] once every
//! [`CHECK_INTERVAL`] units. The worst-case overshoot past the budget is
//! therefore one interval's worth of work.

use std::time::{Duration, Instant};

use crate::error::{Phase, SolveError};

/// Units of work between two wall-clock reads.
pub const CHECK_INTERVAL: u64 = 1 << 20;

/// Deadline tracker owned by a single solve call.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    budget: Option<Duration>,
    phase: Phase,
    pending: u64,
    checks: u64,
}

impl Clock {
    /// Start the clock now. `None` means the call may run unbounded.
    pub fn start(budget: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            budget,
            phase: Phase::Fill,
            pending: 0,
            checks: 0,
        }
    }

    /// Clock with no budget; never times out.
    pub fn unbounded() -> Self {
        Self::start(None)
    }

    /// Switch the phase reported in a timeout.
    pub fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Time elapsed since [`Clock::start`].
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Number of wall-clock reads performed so far.
    pub fn checks(&self) -> u64 {
        self.checks
    }

    /// Record `units` of work, reading the clock once an interval is full.
    #[inline]
    pub fn advance(&mut self, units: u64) -> Result<(), SolveError> {
        if self.budget.is_none() {
            return Ok(());
        }
        self.pending = self.pending.saturating_add(units);
        if self.pending < CHECK_INTERVAL {
            return Ok(());
        }
        self.pending = 0;
        self.check()
    }

    /// Read the wall clock unconditionally.
    pub fn check(&mut self) -> Result<(), SolveError> {
        let Some(budget) = self.budget else {
            return Ok(());
        };
        self.checks += 1;
        let elapsed = self.start.elapsed();
        #[cfg(feature = "tracing")]
        tracing::trace!(
            phase = %self.phase,
            elapsed_ms = elapsed.as_millis() as u64,
            budget_ms = budget.as_millis() as u64,
            "deadline check"
        );
        if elapsed >= budget {
            return Err(SolveError::Timeout {
                phase: self.phase,
                budget,
                elapsed,
            });
        }
        Ok(())
    }
}
