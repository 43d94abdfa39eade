//! Debounced search-input emitter.
//!
//! Turns a rapid stream of typed values into a rate-limited stream of commit
//! events while exposing the live value unthrottled. Like the dismissal set,
//! this is a wall-clock state machine with no internal threads - the caller
//! invokes `tick()` periodically.
//!
//! ## Commit rules
//!
//! ```text
//! set_value("")        -> commit immediately (clearing must feel instant)
//! set_value(too-short) -> never commits, cancels anything pending
//! set_value(other)     -> commits via tick() after debounce_ms of silence
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::delay::{now_ms, DelayTimer};
use crate::events::Event;

/// Default quiet period before a steady value commits.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Emitter tuning. Both fields have serde defaults so a profile may omit
/// either; negative values are unrepresentable by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Quiet period in milliseconds before a steady value commits.
    pub debounce_ms: u64,
    /// Values with fewer characters than this never commit. The empty
    /// string is exempt and always commits immediately.
    pub min_length: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_length: 0,
        }
    }
}

/// Debounced emitter state machine.
///
/// The live value is stored synchronously on every [`set_value`] so hosts
/// can echo it unthrottled; commits surface from [`tick`] once the value has
/// been steady for `debounce_ms`.
///
/// [`set_value`]: DebouncedEmitter::set_value
/// [`tick`]: DebouncedEmitter::tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebouncedEmitter {
    config: EmitterConfig,
    value: String,
    timer: DelayTimer,
}

impl DebouncedEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            value: String::new(),
            timer: DelayTimer::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EmitterConfig::default())
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The most recent value pushed in, current even while a commit is
    /// pending.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn pending_commit(&self) -> bool {
        self.timer.is_pending()
    }

    /// Deadline of the pending commit, if any (epoch ms).
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::EmitterSnapshot {
            value: self.value.clone(),
            pending_commit: self.timer.is_pending(),
            debounce_ms: self.config.debounce_ms,
            min_length: self.config.min_length,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Push the latest typed value, against the wall clock.
    pub fn set_value(&mut self, next: impl Into<String>) -> Option<Event> {
        self.set_value_at(next, now_ms())
    }

    /// Push the latest typed value at an explicit `now_ms`.
    ///
    /// The live value is stored unconditionally. The returned event is the
    /// immediate empty-string commit when there is one; everything else
    /// commits later via [`tick_at`](Self::tick_at). Every call re-evaluates
    /// the commit rules from scratch, so rapid below-threshold input can
    /// never leave a stale scheduled commit behind.
    pub fn set_value_at(&mut self, next: impl Into<String>, now_ms: u64) -> Option<Event> {
        self.value = next.into();
        if self.value.is_empty() {
            // Clearing must feel instant: bypass the debounce and make sure
            // no earlier pending commit can also fire.
            self.timer.cancel();
            return Some(Event::SearchCommitted {
                value: String::new(),
                at: Utc::now(),
            });
        }
        if self.value.chars().count() < self.config.min_length {
            // Below threshold: never commits, not even after the delay.
            self.timer.cancel();
            return None;
        }
        self.timer.schedule_at(now_ms, self.config.debounce_ms);
        None
    }

    /// Explicit clear action, against the wall clock.
    pub fn clear(&mut self) -> Vec<Event> {
        self.clear_at(now_ms())
    }

    /// Explicit clear action at `now_ms`. Emits `SearchCleared` followed by
    /// the immediate empty commit, so a host can distinguish "user cleared"
    /// from "user typed down to empty".
    pub fn clear_at(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = vec![Event::SearchCleared { at: Utc::now() }];
        events.extend(self.set_value_at(String::new(), now_ms));
        events
    }

    /// Poll the debounce timer against the wall clock.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Poll the debounce timer at `now_ms`. The commit carries the value
    /// current at fire time; intermediate values were rescheduled away and
    /// only the last steady value survives.
    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.timer.fire_at(now_ms) {
            return Some(Event::SearchCommitted {
                value: self.value.clone(),
                at: Utc::now(),
            });
        }
        None
    }

    /// Teardown: cancel the pending commit without emitting. Nothing fires
    /// after this returns.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}
