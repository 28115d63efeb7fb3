mod config;

pub use config::{AudioConfig, CompanionConfig, Config, DurationsConfig, UiConfig};

use std::path::PathBuf;

/// Returns `~/.config/focusquest[-dev]/` based on FOCUSQUEST_ENV.
///
/// Set FOCUSQUEST_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSQUEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusquest-dev")
    } else {
        base_dir.join("focusquest")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
