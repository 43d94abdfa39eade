//! # Quiesce Core Library
//!
//! This library provides the timer-coordination logic behind two common
//! widget behaviors: a debounced search input and auto-dismissing
//! notifications. The host view layer owns the authoritative data (the
//! current text value, the list of active notifications) and pushes changes
//! in; the engines run countdowns and hand [`Event`]s back for the host to
//! react to.
//!
//! ## Architecture
//!
//! - **No internal threads**: every engine is a wall-clock-based state
//!   machine. The caller invokes `tick()` periodically and receives fired
//!   events as return values.
//! - **Deterministic seam**: each time-sensitive operation has an
//!   `_at(now_ms)` variant taking an explicit epoch-millisecond timestamp.
//!   Tests and the scenario harness drive these with a virtual clock.
//!
//! ## Key Components
//!
//! - [`DelayTimer`]: cancellable single-shot deadline, the shared primitive
//! - [`DebouncedEmitter`]: rate-limits a live-typed value into commit events
//! - [`TimedDismissalSet`]: per-item pausable auto-dismiss countdowns
//! - [`Scenario`]: deterministic playback of recorded host interactions

pub mod delay;
pub mod dismissal;
pub mod emitter;
pub mod error;
pub mod events;
pub mod scenario;

pub use delay::DelayTimer;
pub use dismissal::{ActiveItem, TimedDismissalSet};
pub use emitter::{DebouncedEmitter, EmitterConfig, DEFAULT_DEBOUNCE_MS};
pub use error::{CoreError, Result, ValidationError};
pub use events::Event;
pub use scenario::{play, Action, PlaybackEntry, Scenario, Step};
