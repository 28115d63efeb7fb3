//! Ambient-audio collaborator boundary.
//!
//! The core never synthesizes sound. It knows the catalog of sound
//! identifiers and the contract an audio backend must honor: play a
//! sound through a shared output gain, adjust volume, stop cleanly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The ambient sound catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundKind {
    None,
    EnchantedForest,
    MysticalRain,
    CracklingFire,
    OceanWaves,
    MountainWind,
    LibraryWhispers,
    CafeChatter,
    GentleStream,
    NightCrickets,
    WizardStudy,
    DragonCave,
}

impl SoundKind {
    pub const ALL: [SoundKind; 12] = [
        SoundKind::None,
        SoundKind::EnchantedForest,
        SoundKind::MysticalRain,
        SoundKind::CracklingFire,
        SoundKind::OceanWaves,
        SoundKind::MountainWind,
        SoundKind::LibraryWhispers,
        SoundKind::CafeChatter,
        SoundKind::GentleStream,
        SoundKind::NightCrickets,
        SoundKind::WizardStudy,
        SoundKind::DragonCave,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SoundKind::None => "Silence",
            SoundKind::EnchantedForest => "Enchanted Forest",
            SoundKind::MysticalRain => "Mystical Rain",
            SoundKind::CracklingFire => "Cozy Campfire",
            SoundKind::OceanWaves => "Serene Shores",
            SoundKind::MountainWind => "Mountain Breeze",
            SoundKind::LibraryWhispers => "Ancient Library",
            SoundKind::CafeChatter => "Tavern Ambience",
            SoundKind::GentleStream => "Crystal Stream",
            SoundKind::NightCrickets => "Starlit Evening",
            SoundKind::WizardStudy => "Wizard's Study",
            SoundKind::DragonCave => "Dragon's Lair",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SoundKind::None => "Pure quiet for deep focus",
            SoundKind::EnchantedForest => "Birdsong under a magical canopy",
            SoundKind::MysticalRain => "Soft raindrops on magical leaves",
            SoundKind::CracklingFire => "Warm crackling flames",
            SoundKind::OceanWaves => "Gentle waves on a peaceful beach",
            SoundKind::MountainWind => "Soft wind through mountain peaks",
            SoundKind::LibraryWhispers => "Hushed pages and distant echoes",
            SoundKind::CafeChatter => "Gentle murmur of a cozy tavern",
            SoundKind::GentleStream => "Babbling brook through the forest",
            SoundKind::NightCrickets => "Peaceful cricket symphony",
            SoundKind::WizardStudy => "Magical ambience with soft chimes",
            SoundKind::DragonCave => "Deep, resonant cave atmosphere",
        }
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            SoundKind::None => "none",
            SoundKind::EnchantedForest => "enchanted-forest",
            SoundKind::MysticalRain => "mystical-rain",
            SoundKind::CracklingFire => "crackling-fire",
            SoundKind::OceanWaves => "ocean-waves",
            SoundKind::MountainWind => "mountain-wind",
            SoundKind::LibraryWhispers => "library-whispers",
            SoundKind::CafeChatter => "cafe-chatter",
            SoundKind::GentleStream => "gentle-stream",
            SoundKind::NightCrickets => "night-crickets",
            SoundKind::WizardStudy => "wizard-study",
            SoundKind::DragonCave => "dragon-cave",
        };
        write!(f, "{id}")
    }
}

impl FromStr for SoundKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SoundKind::ALL
            .into_iter()
            .find(|k| k.to_string() == needle)
            .ok_or_else(|| format!("unknown ambient sound: {s}"))
    }
}

/// Contract an ambient-audio backend must honor. Retry logic for a
/// suspended audio context belongs behind this trait, not in the core.
pub trait AmbientAudio {
    /// Begin playing the given sound, replacing whatever was playing.
    fn play(&mut self, sound: SoundKind) -> Result<(), CoreError>;

    /// Volume 0-100 on the shared output gain; values above 100 clamp.
    fn set_volume(&mut self, volume: u8);

    /// Stop cleanly. Must be safe to call when nothing is playing.
    fn stop(&mut self);
}

/// Null backend for headless and test use: tracks state, emits nothing.
#[derive(Debug, Default)]
pub struct SilentAudio {
    playing: Option<SoundKind>,
    volume: u8,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self {
            playing: None,
            volume: 50,
        }
    }

    pub fn playing(&self) -> Option<SoundKind> {
        self.playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }
}

impl AmbientAudio for SilentAudio {
    fn play(&mut self, sound: SoundKind) -> Result<(), CoreError> {
        self.playing = match sound {
            SoundKind::None => None,
            other => Some(other),
        };
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    fn stop(&mut self) {
        self.playing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_ids_roundtrip() {
        for kind in SoundKind::ALL {
            let parsed: SoundKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("elevator-music".parse::<SoundKind>().is_err());
    }

    #[test]
    fn serde_matches_display_ids() {
        let json = serde_json::to_string(&SoundKind::DragonCave).unwrap();
        assert_eq!(json, "\"dragon-cave\"");
    }

    #[test]
    fn silent_audio_tracks_state() {
        let mut audio = SilentAudio::new();
        audio.play(SoundKind::OceanWaves).unwrap();
        assert_eq!(audio.playing(), Some(SoundKind::OceanWaves));

        audio.set_volume(250);
        assert_eq!(audio.volume(), 100);

        audio.play(SoundKind::None).unwrap();
        assert_eq!(audio.playing(), None);

        audio.stop();
        audio.stop(); // idempotent
        assert_eq!(audio.playing(), None);
    }
}
