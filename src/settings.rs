//! Player preferences
//!
//! Stored under their own key, separate from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::storage;

const STORAGE_KEY: &str = "flappy_sim_settings";

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Gain applied to sound cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn load() -> Self {
        storage::load(STORAGE_KEY).unwrap_or_default()
    }

    pub fn save(&self) {
        if storage::save(STORAGE_KEY, self) {
            log::debug!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(1.7);
        settings.set_sfx_volume(-0.2);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_mute_silences() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < f32::EPSILON);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert!((settings.master_volume - 0.8).abs() < f32::EPSILON);
    }
}
