//! # FocusQuest Core Library
//!
//! This library provides the core business logic for FocusQuest, a
//! quest-themed Pomodoro timer. It implements a CLI-first philosophy
//! where all operations are available via a standalone CLI binary, with
//! any GUI being a thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine; the caller invokes
//!   `tick()` once per elapsed second while a session is running
//! - **Task Ledger**: The Dragon of the Day and the treasure list, with
//!   their completion and session bookkeeping
//! - **Companion**: Personality-flavored messages chosen by a seedable
//!   PRNG
//! - **Storage**: TOML-based configuration (session state never
//!   persists)
//! - **Audio**: The ambient-sound collaborator boundary
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TaskLedger`]: Dragon and treasure bookkeeping
//! - [`Quest`]: Orchestrator wiring engine, ledger and companion
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod companion;
pub mod error;
pub mod events;
pub mod ledger;
pub mod quest;
pub mod storage;
pub mod timer;

pub use audio::{AmbientAudio, SilentAudio, SoundKind};
pub use companion::{CompanionProfile, MessageContext, Messenger, Personality};
pub use error::{ConfigError, CoreError, LedgerError, Result, TimerError};
pub use events::Event;
pub use ledger::{Dragon, TaskLedger, Treasure};
pub use quest::Quest;
pub use storage::Config;
pub use timer::{format_mmss, Durations, TimerEngine, TimerMode, TimerState};
