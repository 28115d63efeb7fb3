//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Per-mode timer durations
//! - Companion profile from the onboarding narrative
//! - Ambient sound selection and volume
//! - Appearance and the post-completion grace period
//!
//! Configuration is stored at `~/.config/focusquest/config.toml`. Only
//! configuration persists; session state lives in memory for the life of
//! the process.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::companion::CompanionProfile;
use crate::error::ConfigError;
use crate::timer::Durations;

/// Per-mode durations in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_quick_win_minutes")]
    pub quick_win_minutes: u32,
    #[serde(default = "default_focus_minutes")]
    pub custom_minutes: u32,
    #[serde(default = "default_focus_minutes")]
    pub dragon_minutes: u32,
    #[serde(default = "default_quick_win_minutes")]
    pub treasure_minutes: u32,
}

impl DurationsConfig {
    /// Convert to the engine's seconds-based table.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn to_durations(&self) -> Durations {
        let secs = |min: u32| (min as u64).saturating_mul(60);
        Durations {
            focus_secs: secs(self.focus_minutes),
            short_break_secs: secs(self.short_break_minutes),
            quick_win_secs: secs(self.quick_win_minutes),
            custom_secs: secs(self.custom_minutes),
            dragon_secs: secs(self.dragon_minutes),
            treasure_secs: secs(self.treasure_minutes),
        }
    }
}

/// Companion profile captured by the onboarding narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
    #[serde(default = "default_adventurer_name")]
    pub adventurer_name: String,
    #[serde(default = "default_companion_name")]
    pub companion_name: String,
    #[serde(default = "default_personality")]
    pub personality: String,
}

impl CompanionConfig {
    pub fn to_profile(&self) -> CompanionProfile {
        CompanionProfile {
            adventurer_name: self.adventurer_name.clone(),
            companion_name: self.companion_name.clone(),
            personality: self.personality.clone(),
        }
    }
}

/// Ambient sound configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_sound")]
    pub sound: String,
    #[serde(default = "default_volume")]
    pub volume: u32,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    /// Seconds the "completed" state stays visible before the engine
    /// re-arms. Purely cosmetic; zero is valid.
    #[serde(default = "default_grace_secs")]
    pub completion_grace_secs: u64,
}

// Default functions
fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_quick_win_minutes() -> u32 {
    2
}
fn default_adventurer_name() -> String {
    "Adventurer".into()
}
fn default_companion_name() -> String {
    "Focus Spirit".into()
}
fn default_personality() -> String {
    "encouraging".into()
}
fn default_sound() -> String {
    "none".into()
}
fn default_volume() -> u32 {
    50
}
fn default_dark_mode() -> bool {
    true
}
fn default_grace_secs() -> u64 {
    3
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            quick_win_minutes: default_quick_win_minutes(),
            custom_minutes: default_focus_minutes(),
            dragon_minutes: default_focus_minutes(),
            treasure_minutes: default_quick_win_minutes(),
        }
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            adventurer_name: default_adventurer_name(),
            companion_name: default_companion_name(),
            personality: default_personality(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound: default_sound(),
            volume: default_volume(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            completion_grace_secs: default_grace_secs(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusquest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,
    #[serde(default)]
    pub companion: CompanionConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| {
                            ConfigError::ParseFailed(format!("'{value}' as bool: {e}"))
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|e| {
                            ConfigError::ParseFailed(format!("'{value}' as number: {e}"))
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed into the existing field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(())
    }
}
