//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};
use crate::sim::DifficultySettings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty tuning overrides
    pub difficulty: DifficultySettings,

    // === Audio ===
    /// Sound effects on/off
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Reduced motion (road stripes stop scrolling)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultySettings::default(),
            sound: true,
            master_volume: 0.8,
            reduced_motion: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "car_hop_settings";

    /// Clamp values that may have been hand-edited in storage
    pub fn sanitized(mut self) -> Self {
        self.difficulty = self.difficulty.sanitized();
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            Self::default().master_volume
        };
        self
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound { self.master_volume } else { 0.0 }
    }

    pub fn load(storage: &dyn Storage) -> Self {
        let settings: Self = persistence::load_json_or_default(storage, Self::STORAGE_KEY);
        log::info!("Settings loaded (sound={}, fps={})", settings.sound, settings.show_fps);
        settings.sanitized()
    }

    pub fn save(&self, storage: &mut dyn Storage) -> persistence::Result<()> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings and write back the complete, repaired form
    ///
    /// Leaves every field visible in storage for hand editing. Skips the write
    /// when the stored JSON already matches.
    pub fn load_or_init(storage: &mut dyn Storage) -> Self {
        let settings = Self::load(storage);
        let stored = storage.get(Self::STORAGE_KEY).ok().flatten();
        let current = serde_json::to_string(&settings).ok();
        if stored.is_none() || stored != current {
            if let Err(e) = settings.save(storage) {
                log::warn!("Could not save settings: {}", e);
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(Settings::STORAGE_KEY, r#"{"sound": false, "difficulty": {"max_car_speed": 12.0}}"#)
            .unwrap();
        let settings = Settings::load(&storage);
        assert!(!settings.sound);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.difficulty.max_car_speed, 12.0);
        assert_eq!(settings.difficulty.initial_min_gap, 350.0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = Settings {
            master_volume: 3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let settings = Settings {
            sound: false,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_load_or_init_writes_defaults_on_first_run() {
        let mut storage = MemoryStorage::new();
        let settings = Settings::load_or_init(&mut storage);
        assert_eq!(settings, Settings::default());
        let stored = storage.get(Settings::STORAGE_KEY).unwrap().unwrap();
        assert!(stored.contains("\"master_volume\""));
        assert!(stored.contains("\"difficulty\""));
    }

    #[test]
    fn test_load_or_init_repairs_stored_values() {
        let mut storage = MemoryStorage::new();
        storage
            .set(Settings::STORAGE_KEY, r#"{"master_volume": 7.5}"#)
            .unwrap();
        let settings = Settings::load_or_init(&mut storage);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(Settings::load(&storage).master_volume, 1.0);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            show_fps: true,
            reduced_motion: true,
            ..Default::default()
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }
}
