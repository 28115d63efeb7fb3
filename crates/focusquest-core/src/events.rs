use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{format_mmss, TimerMode, TimerState};

/// Every state change in the core produces an Event.
/// The presentation layer renders these; it never reaches into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        mode: TimerMode,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        mode: TimerMode,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// A running session reached zero. For pomodoro sessions the cycle
    /// tally has already been incremented when this is emitted.
    SessionCompleted {
        mode: TimerMode,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    /// The post-completion grace period ended and the engine re-armed,
    /// possibly auto-chaining into a new mode.
    SessionRearmed {
        mode: TimerMode,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        state: TimerState,
        remaining_secs: u64,
        total_secs: u64,
        /// Remaining time formatted as MM:SS for direct display.
        clock: String,
        /// Elapsed fraction of the session, always in [0, 1].
        progress: f64,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Convenience constructor used by the engine's `snapshot()`.
    pub(crate) fn snapshot(
        mode: TimerMode,
        state: TimerState,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        completed_cycles: u32,
    ) -> Self {
        Event::StateSnapshot {
            mode,
            state,
            remaining_secs,
            total_secs,
            clock: format_mmss(remaining_secs),
            progress,
            completed_cycles,
            at: Utc::now(),
        }
    }
}
