//! Quest orchestrator: the coordination layer between the timer engine,
//! the task ledger and the companion messenger.
//!
//! The engine and ledger deliberately know nothing about each other; the
//! sequencing the original UI performed by hand (complete a hunt, then
//! switch the timer back to pomodoro) is encoded here so every frontend
//! gets it right. All mutation funnels through `&mut self`, which keeps
//! tick delivery and user actions from interleaving non-atomically.

use crate::companion::{CompanionProfile, MessageContext, Messenger};
use crate::error::{CoreError, LedgerError};
use crate::events::Event;
use crate::ledger::{Dragon, TaskLedger, Treasure};
use crate::storage::Config;
use crate::timer::{Durations, TimerEngine, TimerMode, TimerState};

/// A full quest: timer, tasks and companion, coordinated.
#[derive(Debug)]
pub struct Quest {
    engine: TimerEngine,
    ledger: TaskLedger,
    messenger: Messenger,
    profile: CompanionProfile,
    completion_grace_secs: u64,
}

impl Quest {
    pub fn new(durations: Durations, profile: CompanionProfile) -> Self {
        Self {
            engine: TimerEngine::new(durations),
            ledger: TaskLedger::new(),
            messenger: Messenger::new(),
            profile,
            completion_grace_secs: 3,
        }
    }

    /// Build a quest from persisted configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut quest = Self::new(
            config.durations.to_durations(),
            config.companion.to_profile(),
        );
        quest.completion_grace_secs = config.ui.completion_grace_secs;
        quest
    }

    /// Pin the message selection for reproducible output.
    pub fn seed_messages(&mut self, seed: u64) {
        self.messenger = Messenger::seeded(seed);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &TaskLedger {
        &self.ledger
    }

    pub fn dragon(&self) -> &Dragon {
        self.ledger.dragon()
    }

    pub fn active_treasure(&self) -> Option<&Treasure> {
        self.ledger.active_treasure()
    }

    pub fn profile(&self) -> &CompanionProfile {
        &self.profile
    }

    /// Seconds the presentation layer should linger on "completed"
    /// before calling `rearm()`. Zero is valid.
    pub fn completion_grace_secs(&self) -> u64 {
        self.completion_grace_secs
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    // ── Timer passthroughs ───────────────────────────────────────────

    /// Start the countdown, with a word from the companion.
    pub fn start(&mut self) -> Result<(Event, String), CoreError> {
        let event = self.engine.start()?;
        let message = self.messenger.message(&self.profile, MessageContext::Start);
        Ok((event, message))
    }

    pub fn pause(&mut self) -> Result<Event, CoreError> {
        Ok(self.engine.pause()?)
    }

    pub fn reset(&mut self) -> Event {
        self.engine.reset()
    }

    pub fn switch_mode(
        &mut self,
        mode: TimerMode,
        explicit_secs: Option<u64>,
    ) -> Result<Event, CoreError> {
        Ok(self.engine.switch_mode(mode, explicit_secs)?)
    }

    /// Advance time by one second. On completion, pairs the event with a
    /// celebratory companion message.
    pub fn tick(&mut self) -> Option<(Event, String)> {
        let event = self.engine.tick()?;
        let message = self
            .messenger
            .message(&self.profile, MessageContext::Complete);
        Some((event, message))
    }

    /// Apply the post-completion auto-chain. When the chain lands in
    /// break mode the companion announces the rest.
    pub fn rearm(&mut self) -> Option<(Event, Option<String>)> {
        let event = self.engine.rearm()?;
        let message = match self.engine.state() {
            TimerState::Idle if self.engine.mode() == TimerMode::Break => Some(
                self.messenger.message(&self.profile, MessageContext::Break),
            ),
            _ => None,
        };
        Some((event, message))
    }

    // ── Dragon coordination ──────────────────────────────────────────

    pub fn set_dragon_description(&mut self, text: &str) -> Result<(), CoreError> {
        Ok(self.ledger.set_dragon_description(text)?)
    }

    /// Begin a dragon-slaying session of the given length.
    pub fn start_dragon_hunt(&mut self, duration_secs: u64) -> Result<Event, CoreError> {
        self.ledger.start_dragon_hunt()?;
        let event = self
            .engine
            .switch_mode(TimerMode::DragonSlaying, Some(duration_secs));
        match event {
            Ok(event) => Ok(event),
            Err(e) => {
                // Roll the ledger back so a rejected duration leaves no
                // phantom hunt behind.
                self.ledger.cancel_dragon_hunt();
                Err(e.into())
            }
        }
    }

    /// Record one finished battle session and return to pomodoro.
    pub fn finish_dragon_session(&mut self) -> Result<Event, CoreError> {
        self.ledger.finish_dragon_session()?;
        Ok(self.engine.switch_mode(TimerMode::Pomodoro, None)?)
    }

    /// Abandon the battle and return to pomodoro.
    pub fn cancel_dragon_hunt(&mut self) -> Result<Event, CoreError> {
        self.ledger.cancel_dragon_hunt();
        Ok(self.engine.switch_mode(TimerMode::Pomodoro, None)?)
    }

    /// Slay the dragon and return to pomodoro.
    pub fn slay_dragon(&mut self) -> Result<Event, CoreError> {
        self.ledger.complete_dragon()?;
        Ok(self.engine.switch_mode(TimerMode::Pomodoro, None)?)
    }

    pub fn new_dragon_hunt(&mut self) {
        self.ledger.new_dragon_hunt();
    }

    // ── Treasure coordination ────────────────────────────────────────

    pub fn add_treasure(&mut self, name: &str) -> Result<String, CoreError> {
        Ok(self.ledger.add_treasure(name)?)
    }

    pub fn rename_treasure(&mut self, id: &str, new_name: &str) -> Result<(), CoreError> {
        Ok(self.ledger.rename_treasure(id, new_name)?)
    }

    /// Select a treasure and begin hunting it.
    pub fn start_treasure_hunt(&mut self, id: &str, duration_secs: u64) -> Result<Event, CoreError> {
        self.ledger.select_active_treasure(id)?;
        let event = self
            .engine
            .switch_mode(TimerMode::TreasureHunt, Some(duration_secs));
        match event {
            Ok(event) => Ok(event),
            Err(e) => {
                self.ledger.clear_active_treasure();
                Err(e.into())
            }
        }
    }

    /// Collect the active treasure and return to pomodoro.
    pub fn complete_active_treasure(&mut self) -> Result<(Event, String), CoreError> {
        self.ledger.complete_active_treasure()?;
        let event = self.engine.switch_mode(TimerMode::Pomodoro, None)?;
        let message = self
            .messenger
            .message(&self.profile, MessageContext::Complete);
        Ok((event, message))
    }

    /// Drop the selection without collecting and return to pomodoro.
    pub fn cancel_treasure_hunt(&mut self) -> Result<Event, CoreError> {
        self.ledger.clear_active_treasure();
        Ok(self.engine.switch_mode(TimerMode::Pomodoro, None)?)
    }

    /// Delete a treasure; deleting the one under hunt also resets the
    /// timer back to pomodoro.
    pub fn delete_treasure(&mut self, id: &str) -> Result<Option<Event>, CoreError> {
        let was_active = self.ledger.delete_treasure(id)?;
        if was_active {
            return Ok(Some(self.engine.switch_mode(TimerMode::Pomodoro, None)?));
        }
        Ok(None)
    }

    /// Move the hunt to a different treasure mid-session. The countdown
    /// keeps running; only the selection changes.
    pub fn switch_treasure(&mut self, id: &str) -> Result<(), LedgerError> {
        self.ledger.select_active_treasure(id)
    }
}
