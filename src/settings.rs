//! Player preferences
//!
//! Persisted separately from best runs in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::Cosmetics;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Start sessions with the custom avatar
    pub custom_avatar: bool,
    /// Flip the backdrop between dark and light during a run
    pub backdrop_cycle: bool,
    /// Accessibility: keep the backdrop still
    pub reduced_motion: bool,
    /// Show tick and speed readouts in the HUD
    pub show_debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_avatar: false,
            backdrop_cycle: true,
            reduced_motion: false,
            show_debug: false,
        }
    }
}

impl Settings {
    /// Backdrop cycling (respects reduced_motion)
    pub fn effective_backdrop_cycle(&self) -> bool {
        self.backdrop_cycle && !self.reduced_motion
    }

    /// Initial cosmetic state for a new session
    pub fn cosmetics(&self) -> Cosmetics {
        Cosmetics {
            custom_avatar: self.custom_avatar,
            ..Cosmetics::default()
        }
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "house_cup_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_stops_backdrop() {
        let mut settings = Settings::default();
        assert!(settings.effective_backdrop_cycle());
        settings.reduced_motion = true;
        assert!(!settings.effective_backdrop_cycle());
    }

    #[test]
    fn test_cosmetics_follow_avatar_choice() {
        let settings = Settings {
            custom_avatar: true,
            ..Default::default()
        };
        let cosmetics = settings.cosmetics();
        assert!(cosmetics.custom_avatar);
        assert!(cosmetics.dark_backdrop);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"showDebug":true}"#).unwrap();
        assert!(settings.show_debug);
        assert!(settings.backdrop_cycle);
        assert!(!settings.custom_avatar);
    }
}
