//! Cancellable single-shot delay timer.
//!
//! The primitive both engines build on. A `DelayTimer` holds at most one
//! absolute deadline (epoch milliseconds) and is polled by its owner -- there
//! is no background thread and nothing ever fires inside the scheduling call.

use serde::{Deserialize, Serialize};

/// Single-shot timer with at most one outstanding deadline.
///
/// Scheduling while a deadline is pending replaces it, so a given schedule
/// fires at most once and never after `cancel()` returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelayTimer {
    /// Absolute deadline in epoch milliseconds. `None` when idle.
    deadline_ms: Option<u64>,
}

impl DelayTimer {
    pub fn new() -> Self {
        Self { deadline_ms: None }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Whether the pending deadline has been reached at `now_ms`.
    pub fn is_due_at(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|d| now_ms >= d)
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Schedule against the wall clock. Replaces any pending deadline.
    pub fn schedule(&mut self, delay_ms: u64) {
        self.schedule_at(now_ms(), delay_ms);
    }

    /// Schedule relative to an explicit `now_ms`. A zero delay is due on the
    /// next poll; `fire_at` is the only place a schedule is ever observed.
    pub fn schedule_at(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    /// Drop the pending deadline, if any. Idempotent, never fails. After
    /// this returns the cancelled schedule can never fire.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Consume the deadline if due against the wall clock.
    pub fn fire(&mut self) -> bool {
        self.fire_at(now_ms())
    }

    /// Consume the deadline if due at `now_ms`. Returns `true` at most once
    /// per schedule.
    pub fn fire_at(&mut self, now_ms: u64) -> bool {
        if self.is_due_at(now_ms) {
            self.deadline_ms = None;
            true
        } else {
            false
        }
    }
}

pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once_when_due() {
        let mut timer = DelayTimer::new();
        timer.schedule_at(1_000, 300);
        assert!(timer.is_pending());
        assert!(!timer.fire_at(1_299));
        assert!(timer.fire_at(1_300));
        assert!(!timer.is_pending());
        assert!(!timer.fire_at(2_000));
    }

    #[test]
    fn reschedule_replaces_previous_deadline() {
        let mut timer = DelayTimer::new();
        timer.schedule_at(0, 100);
        timer.schedule_at(50, 100);
        // The first deadline (t=100) must never fire.
        assert!(!timer.fire_at(100));
        assert!(timer.fire_at(150));
    }

    #[test]
    fn cancel_wins_even_after_deadline_passed() {
        let mut timer = DelayTimer::new();
        timer.schedule_at(0, 100);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.fire_at(1_000));
    }

    #[test]
    fn cancel_when_idle_is_a_noop() {
        let mut timer = DelayTimer::new();
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_pending());
    }

    #[test]
    fn zero_delay_is_due_on_next_poll_not_synchronously() {
        let mut timer = DelayTimer::new();
        timer.schedule_at(500, 0);
        // Still pending after the scheduling call returns.
        assert!(timer.is_pending());
        assert!(timer.fire_at(500));
    }
}
