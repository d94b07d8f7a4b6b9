//! Periodic gate — the one timer primitive behind every soft schedule.
//!
//! Sampling, the alarm, the screen flip and both upload timers all ask
//! the same question: has `period` elapsed since X?  This module answers
//! it once for all of them: a [`PeriodicGate`] is configured
//! with a period, polled each tick with the current monotonic time, and
//! reports due at most once per period.
//!
//! All arithmetic is wraparound-safe: elapsed time is computed with
//! `wrapping_sub` on the millisecond tick counter, so a counter overflow
//! (u32 wraps after ~49.7 days) produces one correct elapsed value
//! instead of a stall.

/// A timer that reports "due" at most once per configured period.
///
/// Comparisons are strict (`elapsed > period`), matching the deployed
/// unit's behaviour at period boundaries.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicGate {
    period_ms: u32,
    last_fired_ms: u32,
}

impl PeriodicGate {
    /// Create a gate.  The first poll is due once `period_ms` has elapsed
    /// from time zero.
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_fired_ms: 0,
        }
    }

    /// Milliseconds elapsed since the gate last fired.
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_fired_ms)
    }

    /// Whether the gate would fire at `now_ms`, without consuming it.
    pub fn is_due(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) > self.period_ms
    }

    /// Poll the gate: returns `true` and rearms if the period has elapsed.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.last_fired_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Rearm the gate as if it had fired at `now_ms`.  Used when an
    /// external trigger (e.g. a state change) fires the guarded action
    /// early and the periodic countdown should restart.
    pub fn mark_fired(&mut self, now_ms: u32) {
        self.last_fired_ms = now_ms;
    }
}
