//! Deterministic scenario playback for the two engines.
//!
//! A scenario is a timestamped list of host actions (keystrokes, collection
//! updates, hovers). [`play`] drives a fresh [`DebouncedEmitter`] and
//! [`TimedDismissalSet`] under a virtual clock, ticking at every timer
//! deadline that falls between steps, and returns the complete ordered event
//! log. Identical scenarios always produce identical logs, which makes this
//! the regression harness for timing behavior.

use serde::{Deserialize, Serialize};

use crate::dismissal::{ActiveItem, TimedDismissalSet};
use crate::emitter::{DebouncedEmitter, EmitterConfig};
use crate::error::{CoreError, ValidationError};
use crate::events::Event;

/// A recorded host interaction sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Emitter tuning; defaults apply when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitter: Option<EmitterConfig>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One host action at a point on the virtual clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Virtual timestamp in milliseconds from scenario start.
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// The inbound half of the host boundary, as scenario data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// A keystroke or programmatic value change in the search box.
    SetValue { value: String },
    /// The explicit clear-search action.
    Clear,
    /// The host's notification collection changed.
    Reconcile { items: Vec<ActiveItem> },
    /// Pointer entered an item (suspend its countdown).
    Pause { id: String },
    /// Pointer left an item.
    Resume { id: String },
    /// The user closed an item manually.
    Dismiss { id: String },
}

/// One emitted event with its virtual timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackEntry {
    pub at_ms: u64,
    pub event: Event,
}

/// Play a scenario to completion and return the ordered event log.
///
/// Steps must be in nondecreasing `at_ms` order. After the last step the
/// clock runs out: every still-pending countdown gets to fire (or be
/// suppressed, if paused).
pub fn play(scenario: &Scenario) -> Result<Vec<PlaybackEntry>, ValidationError> {
    validate(scenario)?;

    let mut emitter = DebouncedEmitter::new(scenario.emitter.unwrap_or_default());
    let mut dismissals = TimedDismissalSet::new();
    let mut log = Vec::new();

    for step in &scenario.steps {
        drain_until(&mut emitter, &mut dismissals, step.at_ms, &mut log);
        let now = step.at_ms;
        match &step.action {
            Action::SetValue { value } => {
                if let Some(event) = emitter.set_value_at(value.clone(), now) {
                    log.push(PlaybackEntry { at_ms: now, event });
                }
            }
            Action::Clear => {
                for event in emitter.clear_at(now) {
                    log.push(PlaybackEntry { at_ms: now, event });
                }
            }
            Action::Reconcile { items } => dismissals.reconcile_at(items, now),
            Action::Pause { id } => dismissals.pause(id),
            Action::Resume { id } => dismissals.resume_at(id, now),
            Action::Dismiss { id } => dismissals.dismiss(id),
        }
    }

    drain_until(&mut emitter, &mut dismissals, u64::MAX, &mut log);
    Ok(log)
}

fn validate(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.steps.is_empty() {
        return Err(ValidationError::EmptyScenario);
    }
    let mut prev_ms = 0;
    for (index, step) in scenario.steps.iter().enumerate() {
        if step.at_ms < prev_ms {
            return Err(ValidationError::StepsOutOfOrder {
                index,
                at_ms: step.at_ms,
                prev_ms,
            });
        }
        prev_ms = step.at_ms;
    }
    Ok(())
}

/// Advance the virtual clock to `until_ms`, ticking both engines at every
/// intervening deadline. Deadlines landing exactly on `until_ms` fire before
/// the step applied there, since their timers were scheduled earlier.
fn drain_until(
    emitter: &mut DebouncedEmitter,
    dismissals: &mut TimedDismissalSet,
    until_ms: u64,
    log: &mut Vec<PlaybackEntry>,
) {
    loop {
        let next = [emitter.next_deadline_ms(), dismissals.next_deadline_ms()]
            .into_iter()
            .flatten()
            .min();
        let Some(deadline) = next else { break };
        if deadline > until_ms {
            break;
        }
        if let Some(event) = emitter.tick_at(deadline) {
            log.push(PlaybackEntry {
                at_ms: deadline,
                event,
            });
        }
        for event in dismissals.tick_at(deadline) {
            log.push(PlaybackEntry {
                at_ms: deadline,
                event,
            });
        }
    }
}
