//! Quest ledger: the Dragon of the Day and the treasure list.
//!
//! The ledger owns the task entities and their bookkeeping. It never
//! drives time - it only reacts to user mutations and to completion
//! events the caller relays from the timer engine. Coordination with the
//! engine (e.g. switching back to pomodoro after a hunt) lives in
//! [`crate::quest::Quest`], mirroring the UI-driven sequencing of the
//! original design.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// The single designated high-priority task for a session.
///
/// An empty description means no dragon has been named yet and hunts
/// cannot start. Once slain, the dragon is locked until a new hunt
/// resets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dragon {
    pub description: String,
    /// Battle sessions fought against this dragon.
    pub sessions_spent: u32,
    /// True only while a dragon-slaying session is underway.
    pub is_active: bool,
    /// Terminal: the dragon has been slain.
    pub is_completed: bool,
}

impl Dragon {
    pub fn is_named(&self) -> bool {
        !self.description.is_empty()
    }
}

/// A quick-win task tracked in the treasure list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    /// Stable opaque identifier assigned at creation.
    pub id: String,
    pub name: String,
    /// Hunt sessions spent on this treasure.
    pub sessions_spent: u32,
    /// Terminal: collected treasures keep their name forever.
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Treasure {
    fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Treasure {
            id: format!("treasure-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            name: name.into(),
            sessions_spent: 0,
            is_completed: false,
            created_at: now,
        }
    }
}

/// Owns the dragon and treasure entities plus the active-treasure
/// selection for the current hunt.
///
/// The active selection is a weak reference by id; the treasure list
/// keeps ownership. It always names an existing, uncollected treasure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskLedger {
    dragon: Dragon,
    treasures: Vec<Treasure>,
    active_treasure_id: Option<String>,
}

impl TaskLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn dragon(&self) -> &Dragon {
        &self.dragon
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    /// Treasures still waiting to be collected.
    pub fn active_treasures(&self) -> impl Iterator<Item = &Treasure> {
        self.treasures.iter().filter(|t| !t.is_completed)
    }

    /// Collected treasures.
    pub fn completed_treasures(&self) -> impl Iterator<Item = &Treasure> {
        self.treasures.iter().filter(|t| t.is_completed)
    }

    /// The treasure selected for the current hunt, if any.
    pub fn active_treasure(&self) -> Option<&Treasure> {
        let id = self.active_treasure_id.as_deref()?;
        self.treasures.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Treasure, LedgerError> {
        self.treasures
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound { id: id.to_string() })
    }

    // ── Dragon ───────────────────────────────────────────────────────

    /// Name (or rename) the dragon of the day.
    pub fn set_dragon_description(&mut self, text: &str) -> Result<(), LedgerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LedgerError::EmptyInput {
                field: "dragon description",
            });
        }
        if self.dragon.is_completed {
            return Err(LedgerError::InvalidState(
                "dragon already slain; start a new hunt first",
            ));
        }
        self.dragon.description = text.to_string();
        Ok(())
    }

    /// Mark a dragon-slaying session as underway. The caller pairs this
    /// with `engine.switch_mode(DragonSlaying, duration)`.
    pub fn start_dragon_hunt(&mut self) -> Result<(), LedgerError> {
        if !self.dragon.is_named() {
            return Err(LedgerError::EmptyInput {
                field: "dragon description",
            });
        }
        if self.dragon.is_completed {
            return Err(LedgerError::InvalidState("dragon already slain"));
        }
        self.dragon.is_active = true;
        Ok(())
    }

    /// Record one finished battle session without slaying the dragon.
    pub fn finish_dragon_session(&mut self) -> Result<(), LedgerError> {
        if !self.dragon.is_active {
            return Err(LedgerError::InvalidState("no dragon hunt underway"));
        }
        self.dragon.sessions_spent += 1;
        self.dragon.is_active = false;
        Ok(())
    }

    /// Abandon the current battle session; the tally is untouched.
    pub fn cancel_dragon_hunt(&mut self) {
        self.dragon.is_active = false;
    }

    /// Slay the dragon. Terminal until `new_dragon_hunt()`.
    pub fn complete_dragon(&mut self) -> Result<(), LedgerError> {
        if !self.dragon.is_named() {
            return Err(LedgerError::InvalidState("no dragon to slay"));
        }
        if self.dragon.is_completed {
            return Err(LedgerError::InvalidState("dragon already slain"));
        }
        self.dragon.is_completed = true;
        self.dragon.is_active = false;
        Ok(())
    }

    /// Clear the slain dragon and start fresh.
    pub fn new_dragon_hunt(&mut self) {
        self.dragon = Dragon::default();
    }

    // ── Treasures ────────────────────────────────────────────────────

    /// Append a new treasure. Returns its id.
    pub fn add_treasure(&mut self, name: &str) -> Result<String, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyInput {
                field: "treasure name",
            });
        }
        let treasure = Treasure::new(name);
        let id = treasure.id.clone();
        self.treasures.push(treasure);
        Ok(id)
    }

    /// Rename an uncollected treasure.
    pub fn rename_treasure(&mut self, id: &str, new_name: &str) -> Result<(), LedgerError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(LedgerError::EmptyInput {
                field: "treasure name",
            });
        }
        let treasure = self.find_mut(id)?;
        if treasure.is_completed {
            return Err(LedgerError::InvalidState(
                "collected treasures keep their name",
            ));
        }
        treasure.name = new_name.to_string();
        Ok(())
    }

    /// Remove a treasure regardless of completion state.
    ///
    /// Returns true if the deleted treasure was the active one, in which
    /// case the caller must also reset the engine to pomodoro.
    pub fn delete_treasure(&mut self, id: &str) -> Result<bool, LedgerError> {
        let idx = self
            .treasures
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound { id: id.to_string() })?;
        self.treasures.remove(idx);
        let was_active = self.active_treasure_id.as_deref() == Some(id);
        if was_active {
            self.active_treasure_id = None;
        }
        Ok(was_active)
    }

    /// Select the treasure for the next (or current) hunt. Pure
    /// reassignment - session counts are untouched.
    pub fn select_active_treasure(&mut self, id: &str) -> Result<(), LedgerError> {
        let treasure = self
            .treasures
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound { id: id.to_string() })?;
        if treasure.is_completed {
            return Err(LedgerError::InvalidState("treasure already collected"));
        }
        self.active_treasure_id = Some(id.to_string());
        Ok(())
    }

    /// Drop the active selection without collecting anything.
    pub fn clear_active_treasure(&mut self) {
        self.active_treasure_id = None;
    }

    /// Collect the active treasure: one more session spent, marked
    /// completed, selection cleared. The three writes happen before any
    /// caller can observe the ledger again, so no partially-collected
    /// treasure is ever visible.
    pub fn complete_active_treasure(&mut self) -> Result<&Treasure, LedgerError> {
        let id = self
            .active_treasure_id
            .take()
            .ok_or(LedgerError::InvalidState("no active treasure"))?;
        let treasure = self
            .treasures
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LedgerError::NotFound { id })?;
        treasure.sessions_spent += 1;
        treasure.is_completed = true;
        Ok(treasure)
    }
}
