//! Widget settings
//!
//! Persisted in LocalStorage, separate from bookmarks.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_ROUNDS, ROTATION_STEP_DEG};

/// Widget settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Contest ===
    /// Rounds per contest
    pub max_rounds: u32,
    /// Delay between the last round and the final verdict (ms)
    pub round_end_delay_ms: u32,

    // === Sequencer ===
    /// Delay between acknowledging a step and opening the next one (ms)
    pub step_advance_delay_ms: u32,

    // === Gallery ===
    /// Degrees per rotate click
    pub rotation_step_deg: f32,

    // === Audio ===
    /// Play a tone when the tutorial step changes
    pub step_cues: bool,
    /// Cue volume (0.0 - 1.0)
    pub cue_volume: f32,
    /// Cue length (seconds)
    pub cue_duration_s: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            round_end_delay_ms: 1000,

            step_advance_delay_ms: 500,

            rotation_step_deg: ROTATION_STEP_DEG,

            step_cues: true,
            cue_volume: 0.3,
            cue_duration_s: 0.1,
        }
    }
}

impl Settings {
    /// Clamp values a hand-edited store could break
    pub fn sanitized(mut self) -> Self {
        self.max_rounds = self.max_rounds.clamp(1, 9);
        self.round_end_delay_ms = self.round_end_delay_ms.min(10_000);
        self.step_advance_delay_ms = self.step_advance_delay_ms.min(10_000);
        if !self.rotation_step_deg.is_finite() {
            self.rotation_step_deg = ROTATION_STEP_DEG;
        }
        self.cue_volume = if self.cue_volume.is_finite() {
            self.cue_volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.cue_duration_s.is_finite() || self.cue_duration_s <= 0.0 {
            self.cue_duration_s = 0.1;
        }
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tea_museum_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings.sanitized();
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"max_rounds":5}"#).unwrap();
        assert_eq!(s.max_rounds, 5);
        assert_eq!(s.round_end_delay_ms, 1000);
        assert!(s.step_cues);
    }

    #[test]
    fn test_sanitized_clamps() {
        let s = Settings {
            max_rounds: 0,
            cue_volume: 4.0,
            cue_duration_s: -1.0,
            rotation_step_deg: f32::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.max_rounds, 1);
        assert_eq!(s.cue_volume, 1.0);
        assert_eq!(s.cue_duration_s, 0.1);
        assert_eq!(s.rotation_step_deg, 45.0);
    }

    #[test]
    fn test_defaults_survive_sanitizing() {
        assert_eq!(Settings::default().sanitized(), Settings::default());
    }
}
