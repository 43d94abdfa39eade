//! Timed dismissal set for notification-style items.
//!
//! Each active item with a nonzero duration owns an independent countdown.
//! The set reconciles itself against the host's collection on every update,
//! supports hover-style pause/resume, and emits at most one
//! [`Event::ItemDismissed`] per record lifetime.
//!
//! Per-item state machine:
//!
//! ```text
//! NoSchedule -> Scheduled -> (Paused <-> Scheduled) -> Fired/Removed
//! ```
//!
//! A removed identifier that reappears in a later `reconcile` starts a
//! brand-new record.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::delay::{now_ms, DelayTimer};
use crate::events::Event;

/// One entry of the host's active collection, as seen by `reconcile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveItem {
    pub id: String,
    /// Countdown length in milliseconds; `0` disables auto-dismiss.
    #[serde(default)]
    pub duration_ms: u64,
}

impl ActiveItem {
    pub fn new(id: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DismissalRecord {
    timer: DelayTimer,
    duration_ms: u64,
    paused: bool,
}

/// Per-item auto-dismiss countdowns, reconciled against the host collection.
///
/// Records iterate in identifier order so playback logs are reproducible;
/// dismissals for different identifiers carry no semantic ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimedDismissalSet {
    records: BTreeMap<String, DismissalRecord>,
}

impl TimedDismissalSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_scheduled(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn is_paused(&self, id: &str) -> bool {
        self.records.get(id).is_some_and(|r| r.paused)
    }

    /// Earliest pending deadline across all records (epoch ms). Paused
    /// records still count: their deadline is where suppression happens.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.records
            .values()
            .filter_map(|r| r.timer.deadline_ms())
            .min()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::DismissalSnapshot {
            scheduled: self.records.len(),
            paused: self.records.values().filter(|r| r.paused).count(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Reconcile against the host collection, against the wall clock.
    pub fn reconcile(&mut self, items: &[ActiveItem]) {
        self.reconcile_at(items, now_ms());
    }

    /// Reconcile against the host collection at `now_ms`.
    ///
    /// Records for identifiers no longer active (or active with a zero
    /// duration) are cancelled and dropped; newly active identifiers with a
    /// nonzero duration get a fresh record; existing records are left
    /// untouched, so repeated reconciliation never restarts a countdown.
    /// On duplicate identifiers the first occurrence wins.
    pub fn reconcile_at(&mut self, items: &[ActiveItem], now_ms: u64) {
        let mut active: BTreeMap<&str, u64> = BTreeMap::new();
        for item in items {
            if item.duration_ms > 0 {
                active.entry(item.id.as_str()).or_insert(item.duration_ms);
            }
        }

        self.records.retain(|id, _| active.contains_key(id.as_str()));

        for (id, duration_ms) in active {
            if !self.records.contains_key(id) {
                let mut timer = DelayTimer::new();
                timer.schedule_at(now_ms, duration_ms);
                self.records.insert(
                    id.to_string(),
                    DismissalRecord {
                        timer,
                        duration_ms,
                        paused: false,
                    },
                );
            }
        }
    }

    /// Suppress the countdown, typically on hover. Idempotent; unknown
    /// identifiers are no-ops because the host may race collection updates
    /// against user actions.
    pub fn pause(&mut self, id: &str) {
        if let Some(record) = self.records.get_mut(id) {
            record.paused = true;
        }
    }

    /// Re-enable the countdown, against the wall clock.
    pub fn resume(&mut self, id: &str) {
        self.resume_at(id, now_ms());
    }

    /// Re-enable the countdown at `now_ms`. Idempotent; unknown identifiers
    /// are no-ops.
    ///
    /// If the deadline elapsed while paused the record restarts with a fresh
    /// full-duration countdown - resuming must never dismiss immediately
    /// just because the original delay ran out under the pause.
    pub fn resume_at(&mut self, id: &str, now_ms: u64) {
        if let Some(record) = self.records.get_mut(id) {
            if !record.paused {
                return;
            }
            record.paused = false;
            if !record.timer.is_pending() || record.timer.is_due_at(now_ms) {
                record.timer.schedule_at(now_ms, record.duration_ms);
            }
        }
    }

    /// Host-initiated removal. Cancels and drops the record regardless of
    /// pause state, emitting nothing - the host already knows. No-op on
    /// unknown identifiers.
    pub fn dismiss(&mut self, id: &str) {
        self.records.remove(id);
    }

    /// Poll every countdown against the wall clock.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(now_ms())
    }

    /// Poll every countdown at `now_ms`. Due unpaused records dismiss
    /// exactly once and are removed; due paused records are suppressed at
    /// fire time and kept around for `resume`.
    pub fn tick_at(&mut self, now_ms: u64) -> Vec<Event> {
        let mut fired = Vec::new();
        for (id, record) in self.records.iter_mut() {
            if record.timer.fire_at(now_ms) {
                // Pause is checked at fire time: an in-flight deadline is
                // consumed but must not dismiss.
                if !record.paused {
                    fired.push(id.clone());
                }
            }
        }

        let mut events = Vec::with_capacity(fired.len());
        for id in fired {
            self.records.remove(&id);
            events.push(Event::ItemDismissed { id, at: Utc::now() });
        }
        events
    }

    /// Teardown: cancel and drop every record. Nothing fires after this
    /// returns.
    pub fn cancel_all(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dismissed_ids(events: &[Event]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::ItemDismissed { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn scheduled_item_dismisses_exactly_once() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("a", 1_000)], 0);
        assert!(set.is_scheduled("a"));

        assert!(set.tick_at(999).is_empty());
        let events = set.tick_at(1_000);
        assert_eq!(dismissed_ids(&events), ["a"]);
        assert!(!set.is_scheduled("a"));
        assert!(set.tick_at(10_000).is_empty());
    }

    #[test]
    fn removal_before_deadline_cancels_dismissal() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("a", 1_000)], 0);
        set.reconcile_at(&[], 500);
        assert!(set.is_empty());
        assert!(set.tick_at(10_000).is_empty());
    }

    #[test]
    fn reconcile_leaves_existing_records_untouched() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("a", 1_000)], 0);
        // Re-reconciling the same id must not restart the countdown.
        set.reconcile_at(&[ActiveItem::new("a", 1_000)], 900);
        let events = set.tick_at(1_000);
        assert_eq!(dismissed_ids(&events), ["a"]);
    }

    #[test]
    fn zero_duration_items_are_never_scheduled() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(
            &[ActiveItem::new("sticky", 0), ActiveItem::new("timed", 200)],
            0,
        );
        assert!(!set.is_scheduled("sticky"));
        assert!(set.is_scheduled("timed"));
        let events = set.tick_at(60_000);
        assert_eq!(dismissed_ids(&events), ["timed"]);
    }

    #[test]
    fn pause_suppresses_and_resume_restarts_fresh() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("x", 200)], 0);

        set.pause("x");
        // The original deadline elapses under the pause: suppressed.
        assert!(set.tick_at(250).is_empty());
        assert!(set.is_scheduled("x"));

        // Resume at t=300 restarts a full 200ms countdown.
        set.resume_at("x", 300);
        assert!(set.tick_at(499).is_empty());
        let events = set.tick_at(500);
        assert_eq!(dismissed_ids(&events), ["x"]);
    }

    #[test]
    fn resume_before_deadline_keeps_original_countdown() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("x", 200)], 0);
        set.pause("x");
        // Unpaused again before the deadline: the timer never stopped.
        set.resume_at("x", 100);
        let events = set.tick_at(200);
        assert_eq!(dismissed_ids(&events), ["x"]);
    }

    #[test]
    fn pause_without_intervening_tick_still_restarts_on_resume() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("x", 200)], 0);
        set.pause("x");
        // No tick observed the elapsed deadline; resume checks it directly.
        set.resume_at("x", 300);
        assert!(set.tick_at(300).is_empty());
        let events = set.tick_at(500);
        assert_eq!(dismissed_ids(&events), ["x"]);
    }

    #[test]
    fn manual_dismiss_removes_without_emitting() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("a", 1_000)], 0);
        set.pause("a");
        set.dismiss("a");
        assert!(set.is_empty());
        assert!(set.tick_at(10_000).is_empty());
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut set = TimedDismissalSet::new();
        set.pause("ghost");
        set.resume("ghost");
        set.dismiss("ghost");
        assert!(set.is_empty());
        assert!(set.tick_at(10_000).is_empty());
    }

    #[test]
    fn readded_id_gets_a_fresh_record() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("a", 500)], 0);
        let events = set.tick_at(500);
        assert_eq!(dismissed_ids(&events), ["a"]);

        // Same identifier reappears: brand-new countdown from t=600.
        set.reconcile_at(&[ActiveItem::new("a", 500)], 600);
        assert!(set.tick_at(1_000).is_empty());
        let events = set.tick_at(1_100);
        assert_eq!(dismissed_ids(&events), ["a"]);
    }

    #[test]
    fn duplicate_ids_in_reconcile_first_wins() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(
            &[ActiveItem::new("a", 100), ActiveItem::new("a", 9_000)],
            0,
        );
        let events = set.tick_at(100);
        assert_eq!(dismissed_ids(&events), ["a"]);
    }

    #[test]
    fn independent_timers_fire_independently() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(
            &[ActiveItem::new("fast", 100), ActiveItem::new("slow", 300)],
            0,
        );
        assert_eq!(dismissed_ids(&set.tick_at(100)), ["fast"]);
        assert!(set.is_scheduled("slow"));
        assert_eq!(dismissed_ids(&set.tick_at(300)), ["slow"]);
    }

    #[test]
    fn cancel_all_suppresses_everything() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(
            &[ActiveItem::new("a", 100), ActiveItem::new("b", 200)],
            0,
        );
        set.cancel_all();
        assert!(set.is_empty());
        assert!(set.tick_at(10_000).is_empty());
    }

    #[test]
    fn reconcile_drops_record_when_duration_becomes_zero() {
        let mut set = TimedDismissalSet::new();
        set.reconcile_at(&[ActiveItem::new("a", 1_000)], 0);
        // The host turned the item sticky; the schedule must go away.
        set.reconcile_at(&[ActiveItem::new("a", 0)], 500);
        assert!(!set.is_scheduled("a"));
        assert!(set.tick_at(10_000).is_empty());
    }
}
