use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every observable effect of an engine is an Event.
/// The host reacts to them; the GUI layer may also poll for snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A steady search value committed: the debounce window elapsed, or the
    /// value became empty (which commits immediately).
    SearchCommitted { value: String, at: DateTime<Utc> },
    /// The search box was explicitly cleared by the user. Always followed by
    /// an empty `SearchCommitted` on the same call.
    SearchCleared { at: DateTime<Utc> },
    /// A timed item's countdown elapsed; the host should remove the item
    /// from its collection. At most one per record lifetime.
    ItemDismissed { id: String, at: DateTime<Utc> },
    /// Full emitter state, for host polling and diagnostics.
    EmitterSnapshot {
        value: String,
        pending_commit: bool,
        debounce_ms: u64,
        min_length: usize,
        at: DateTime<Utc>,
    },
    /// Full dismissal-set state, for host polling and diagnostics.
    DismissalSnapshot {
        scheduled: usize,
        paused: usize,
        at: DateTime<Utc>,
    },
}
