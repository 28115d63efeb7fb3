//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads or wall-clock reads - the caller invokes `tick()`
//! once per elapsed second while a session is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//!           |
//!           v (remaining hits zero)
//!        Completed -> Idle (rearm / reset / switch_mode)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Durations::default());
//! engine.start()?;
//! // Once per second:
//! if let Some(event) = engine.tick() {
//!     // SessionCompleted - show it, then after the grace period:
//!     engine.rearm();
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{Durations, TimerMode};
use crate::error::TimerError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Session reached zero; terminal until reset, switch_mode or rearm.
    Completed,
}

/// Core timer engine.
///
/// Driven entirely by the caller - suspension is simply not calling
/// `tick()`, and cancellation is dropping the tick source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    mode: TimerMode,
    state: TimerState,
    /// Remaining time in seconds for the current session.
    remaining_secs: u64,
    /// Duration the session started from; fixed until reset/switch.
    total_secs: u64,
    /// Pomodoro sessions completed since process start.
    completed_cycles: u32,
    durations: Durations,
}

impl TimerEngine {
    /// Create a new engine in pomodoro mode, idle, fully wound.
    pub fn new(durations: Durations) -> Self {
        let total = durations.for_mode(TimerMode::Pomodoro);
        Self {
            mode: TimerMode::Pomodoro,
            state: TimerState::Idle,
            remaining_secs: total,
            total_secs: total,
            completed_cycles: 0,
            durations,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// 0.0 .. 1.0 elapsed fraction of the current session.
    ///
    /// `total_secs` is positive by construction, so this never divides
    /// by zero.
    pub fn progress(&self) -> f64 {
        (self.total_secs - self.remaining_secs) as f64 / self.total_secs as f64
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::snapshot(
            self.mode,
            self.state,
            self.remaining_secs,
            self.total_secs,
            self.progress(),
            self.completed_cycles,
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume counting down.
    ///
    /// Legal from `Idle` and `Paused`. A completed session must go
    /// through `reset()`, `switch_mode()` or `rearm()` first.
    pub fn start(&mut self) -> Result<Event, TimerError> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Ok(Event::SessionStarted {
                    mode: self.mode,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            state => Err(TimerError::InvalidTransition {
                action: "start",
                state,
            }),
        }
    }

    /// Freeze the countdown. Legal only while running.
    pub fn pause(&mut self) -> Result<Event, TimerError> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Ok(Event::SessionPaused {
                    mode: self.mode,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            state => Err(TimerError::InvalidTransition {
                action: "pause",
                state,
            }),
        }
    }

    /// Advance time by one second.
    ///
    /// The sole place time moves. No-op unless running. Returns
    /// `Some(Event::SessionCompleted)` on the tick that reaches zero;
    /// pomodoro completions increment the cycle tally first.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.state = TimerState::Completed;
        if self.mode == TimerMode::Pomodoro {
            self.completed_cycles += 1;
        }
        Some(Event::SessionCompleted {
            mode: self.mode,
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        })
    }

    /// Rewind the current mode to its default duration. Legal from any
    /// state.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.total_secs = self.durations.for_mode(self.mode);
        self.remaining_secs = self.total_secs;
        Event::SessionReset {
            mode: self.mode,
            total_secs: self.total_secs,
            at: Utc::now(),
        }
    }

    /// Switch to a new mode with a fresh session.
    ///
    /// `explicit_secs` overrides the mode's default duration (used for
    /// custom, dragon and treasure sessions where the user picks the
    /// length). Zero is rejected. Switching away from dragon or treasure
    /// modes does not touch the task ledger - that coordination lives
    /// with the caller.
    pub fn switch_mode(
        &mut self,
        mode: TimerMode,
        explicit_secs: Option<u64>,
    ) -> Result<Event, TimerError> {
        let total = match explicit_secs {
            Some(0) => return Err(TimerError::InvalidDuration { seconds: 0 }),
            Some(secs) => secs,
            None => self.durations.for_mode(mode),
        };
        self.mode = mode;
        self.state = TimerState::Idle;
        self.total_secs = total;
        self.remaining_secs = total;
        Ok(Event::ModeSwitched {
            mode,
            total_secs: total,
            at: Utc::now(),
        })
    }

    /// Apply the post-completion auto-chain.
    ///
    /// Called by the presentation layer once its grace period elapses
    /// (which may be zero). Pomodoro chains into break and break back
    /// into pomodoro; every other mode re-arms idle in place with a
    /// fresh default duration. No-op unless completed.
    pub fn rearm(&mut self) -> Option<Event> {
        if self.state != TimerState::Completed {
            return None;
        }
        let next = self.mode.auto_chain().unwrap_or(self.mode);
        self.mode = next;
        self.state = TimerState::Idle;
        self.total_secs = self.durations.for_mode(next);
        self.remaining_secs = self.total_secs;
        Some(Event::SessionRearmed {
            mode: next,
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Replace the default duration table. Takes effect on the next
    /// reset, switch or rearm; the in-flight session keeps its totals.
    pub fn set_durations(&mut self, durations: Durations) {
        self.durations = durations;
    }
}

/// Format seconds as `MM:SS` for display.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> TimerEngine {
        TimerEngine::new(Durations::default())
    }

    #[test]
    fn start_pause_resume() {
        let mut e = engine();
        assert_eq!(e.state(), TimerState::Idle);

        assert!(e.start().is_ok());
        assert_eq!(e.state(), TimerState::Running);

        assert!(e.pause().is_ok());
        assert_eq!(e.state(), TimerState::Paused);

        assert!(e.start().is_ok());
        assert_eq!(e.state(), TimerState::Running);
    }

    #[test]
    fn pause_rejected_unless_running() {
        let mut e = engine();
        assert!(matches!(
            e.pause(),
            Err(TimerError::InvalidTransition {
                action: "pause",
                state: TimerState::Idle,
            })
        ));
    }

    #[test]
    fn tick_is_noop_unless_running() {
        let mut e = engine();
        assert!(e.tick().is_none());
        assert_eq!(e.remaining_secs(), 25 * 60);

        e.start().unwrap();
        e.tick();
        e.pause().unwrap();
        assert!(e.tick().is_none());
        assert_eq!(e.remaining_secs(), 25 * 60 - 1);
    }

    #[test]
    fn completion_of_pomodoro_counts_a_cycle() {
        let mut e = engine();
        e.switch_mode(TimerMode::Pomodoro, Some(3)).unwrap();
        e.start().unwrap();
        assert!(e.tick().is_none());
        assert!(e.tick().is_none());
        let event = e.tick().expect("third tick completes");
        match event {
            Event::SessionCompleted {
                mode,
                completed_cycles,
                ..
            } => {
                assert_eq!(mode, TimerMode::Pomodoro);
                assert_eq!(completed_cycles, 1);
            }
            other => panic!("expected SessionCompleted, got {other:?}"),
        }
        assert_eq!(e.state(), TimerState::Completed);
        assert_eq!(e.remaining_secs(), 0);
    }

    #[test]
    fn break_completion_does_not_count_a_cycle() {
        let mut e = engine();
        e.switch_mode(TimerMode::Break, Some(1)).unwrap();
        e.start().unwrap();
        e.tick();
        assert_eq!(e.completed_cycles(), 0);
    }

    #[test]
    fn completed_session_rejects_start() {
        let mut e = engine();
        e.switch_mode(TimerMode::Quickwin, Some(1)).unwrap();
        e.start().unwrap();
        e.tick();
        assert_eq!(e.state(), TimerState::Completed);
        assert!(matches!(
            e.start(),
            Err(TimerError::InvalidTransition {
                action: "start",
                state: TimerState::Completed,
            })
        ));
    }

    #[test]
    fn tick_after_completion_does_nothing() {
        let mut e = engine();
        e.switch_mode(TimerMode::Custom, Some(1)).unwrap();
        e.start().unwrap();
        assert!(e.tick().is_some());
        assert!(e.tick().is_none());
        assert_eq!(e.remaining_secs(), 0);
    }

    #[test]
    fn rearm_chains_pomodoro_into_break() {
        let mut e = engine();
        e.switch_mode(TimerMode::Pomodoro, Some(2)).unwrap();
        e.start().unwrap();
        e.tick();
        e.tick();
        assert!(e.rearm().is_some());
        assert_eq!(e.mode(), TimerMode::Break);
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_secs(), 5 * 60);
        assert_eq!(e.total_secs(), 5 * 60);
    }

    #[test]
    fn rearm_chains_break_back_into_pomodoro() {
        let mut e = engine();
        e.switch_mode(TimerMode::Break, Some(1)).unwrap();
        e.start().unwrap();
        e.tick();
        e.rearm();
        assert_eq!(e.mode(), TimerMode::Pomodoro);
        assert_eq!(e.remaining_secs(), 25 * 60);
    }

    #[test]
    fn rearm_keeps_non_cycle_modes_in_place() {
        let mut e = engine();
        e.switch_mode(TimerMode::TreasureHunt, Some(1)).unwrap();
        e.start().unwrap();
        e.tick();
        e.rearm();
        assert_eq!(e.mode(), TimerMode::TreasureHunt);
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_secs(), 2 * 60);
    }

    #[test]
    fn rearm_is_noop_unless_completed() {
        let mut e = engine();
        assert!(e.rearm().is_none());
        e.start().unwrap();
        assert!(e.rearm().is_none());
        assert_eq!(e.mode(), TimerMode::Pomodoro);
    }

    #[test]
    fn reset_rewinds_regardless_of_progress() {
        let mut e = engine();
        e.start().unwrap();
        for _ in 0..100 {
            e.tick();
        }
        e.reset();
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_secs(), 25 * 60);
        assert_eq!(e.total_secs(), 25 * 60);
    }

    #[test]
    fn switch_mode_rejects_zero_duration() {
        let mut e = engine();
        assert!(matches!(
            e.switch_mode(TimerMode::Custom, Some(0)),
            Err(TimerError::InvalidDuration { seconds: 0 })
        ));
        // Engine untouched by the rejected switch.
        assert_eq!(e.mode(), TimerMode::Pomodoro);
        assert_eq!(e.remaining_secs(), 25 * 60);
    }

    #[test]
    fn switch_mode_with_explicit_duration() {
        let mut e = engine();
        e.switch_mode(TimerMode::DragonSlaying, Some(45 * 60)).unwrap();
        assert_eq!(e.total_secs(), 45 * 60);
        assert_eq!(e.remaining_secs(), 45 * 60);
        assert_eq!(e.state(), TimerState::Idle);
    }

    #[test]
    fn switch_then_reset_yields_mode_default() {
        let mut e = engine();
        e.switch_mode(TimerMode::Pomodoro, None).unwrap();
        e.reset();
        assert_eq!(e.remaining_secs(), 25 * 60);
        assert_eq!(e.total_secs(), 25 * 60);
        assert_eq!(e.state(), TimerState::Idle);
    }

    #[test]
    fn progress_stays_in_bounds() {
        let mut e = engine();
        e.switch_mode(TimerMode::Quickwin, Some(4)).unwrap();
        assert_eq!(e.progress(), 0.0);
        e.start().unwrap();
        e.tick();
        assert_eq!(e.progress(), 0.25);
        e.tick();
        e.tick();
        e.tick();
        assert_eq!(e.progress(), 1.0);
    }

    #[test]
    fn format_mmss_pads_both_fields() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(61), "01:01");
        assert_eq!(format_mmss(25 * 60), "25:00");
        assert_eq!(format_mmss(599), "09:59");
    }

    #[test]
    fn snapshot_carries_clock_and_progress() {
        let e = engine();
        match e.snapshot() {
            Event::StateSnapshot {
                state,
                clock,
                progress,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(clock, "25:00");
                assert_eq!(progress, 0.0);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }

    proptest! {
        /// n ticks from a fresh n-second session always land exactly on
        /// zero, completed.
        #[test]
        fn n_ticks_complete_an_n_second_session(n in 1u64..=600) {
            let mut e = engine();
            e.switch_mode(TimerMode::Custom, Some(n)).unwrap();
            e.start().unwrap();
            for i in 1..n {
                prop_assert!(e.tick().is_none());
                prop_assert_eq!(e.remaining_secs(), n - i);
            }
            prop_assert!(e.tick().is_some());
            prop_assert_eq!(e.remaining_secs(), 0);
            prop_assert_eq!(e.state(), TimerState::Completed);
        }

        /// Progress is monotonically non-decreasing and in [0, 1] over
        /// an uninterrupted run.
        #[test]
        fn progress_is_monotone_while_running(n in 1u64..=600) {
            let mut e = engine();
            e.switch_mode(TimerMode::Custom, Some(n)).unwrap();
            e.start().unwrap();
            let mut last = e.progress();
            prop_assert!(last >= 0.0);
            for _ in 0..n {
                e.tick();
                let p = e.progress();
                prop_assert!(p >= last);
                prop_assert!(p <= 1.0);
                last = p;
            }
        }
    }
}
