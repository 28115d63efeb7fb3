use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Timer modes. The two cycle modes (`Pomodoro`/`Break`) auto-chain into
/// each other on completion; the remaining modes re-arm in place and leave
/// the next move to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    Pomodoro,
    Break,
    Quickwin,
    Custom,
    DragonSlaying,
    TreasureHunt,
}

impl TimerMode {
    /// The mode a completed session chains into, if any.
    pub fn auto_chain(self) -> Option<TimerMode> {
        match self {
            TimerMode::Pomodoro => Some(TimerMode::Break),
            TimerMode::Break => Some(TimerMode::Pomodoro),
            _ => None,
        }
    }

    /// Display label used by the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Focus Quest",
            TimerMode::Break => "Rest",
            TimerMode::Quickwin => "Quick Win",
            TimerMode::Custom => "Custom Magic",
            TimerMode::DragonSlaying => "Dragon Battle",
            TimerMode::TreasureHunt => "Treasure Hunt",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerMode::Pomodoro => "pomodoro",
            TimerMode::Break => "break",
            TimerMode::Quickwin => "quickwin",
            TimerMode::Custom => "custom",
            TimerMode::DragonSlaying => "dragon-slaying",
            TimerMode::TreasureHunt => "treasure-hunt",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pomodoro" => Ok(TimerMode::Pomodoro),
            "break" => Ok(TimerMode::Break),
            "quickwin" | "quick-win" => Ok(TimerMode::Quickwin),
            "custom" => Ok(TimerMode::Custom),
            "dragon-slaying" | "dragon" => Ok(TimerMode::DragonSlaying),
            "treasure-hunt" | "treasure" => Ok(TimerMode::TreasureHunt),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}

/// Per-mode default durations in seconds.
///
/// The engine consults this table whenever a mode switch or reset does not
/// carry an explicit duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub focus_secs: u64,
    pub short_break_secs: u64,
    pub quick_win_secs: u64,
    pub custom_secs: u64,
    pub dragon_secs: u64,
    pub treasure_secs: u64,
}

impl Durations {
    pub fn for_mode(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Pomodoro => self.focus_secs,
            TimerMode::Break => self.short_break_secs,
            TimerMode::Quickwin => self.quick_win_secs,
            TimerMode::Custom => self.custom_secs,
            TimerMode::DragonSlaying => self.dragon_secs,
            TimerMode::TreasureHunt => self.treasure_secs,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 5 * 60,
            quick_win_secs: 2 * 60,
            custom_secs: 25 * 60,
            dragon_secs: 25 * 60,
            treasure_secs: 2 * 60,
        }
    }
}
