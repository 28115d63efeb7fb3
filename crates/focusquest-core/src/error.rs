//! Core error types for focusquest-core.
//!
//! Every error here is local and recoverable -- the presentation layer
//! decides whether to disable a control or simply ignore the rejected
//! action. Nothing in the core panics.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::TimerState;

/// Core error type for focusquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state-machine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Quest ledger errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Timer engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Illegal state-machine move, e.g. starting a completed session.
    #[error("Invalid transition: cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: TimerState,
    },

    /// Non-positive duration supplied to a mode switch.
    #[error("Invalid duration: {seconds}s (must be positive)")]
    InvalidDuration { seconds: u64 },
}

/// Quest ledger errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Blank dragon description or treasure name.
    #[error("Empty input for {field}")]
    EmptyInput { field: &'static str },

    /// Operation referenced an unknown treasure id.
    #[error("No treasure with id '{id}'")]
    NotFound { id: String },

    /// Mutation of an entity that no longer accepts it,
    /// e.g. renaming a collected treasure.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Unknown or malformed configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
