//! Runtime settings
//!
//! Persisted in LocalStorage on the web; read from an optional JSON file
//! natively. Missing or unreadable settings fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame cap for the native loop (0 = uncapped)
    pub target_fps: u32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Directory (native) or URL prefix (web) holding the ghost images
    pub asset_dir: String,
    /// Frames the native headless demo runs before exiting
    pub demo_frames: u32,
    /// Restart automatically when a demo run ends
    pub demo_restart: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            seed: None,
            asset_dir: "imgs".to_string(),
            demo_frames: 3600,
            demo_restart: true,
            show_fps: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pacmac_settings";
    /// Native settings file, read from the working directory
    pub const FILE_NAME: &'static str = "pacmac.json";

    /// Parse settings JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
            log_save_result(storage.set_item(Self::STORAGE_KEY, &self.to_json()));
        }
    }

    /// Load settings from `pacmac.json` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => {
                log::info!("Loaded settings from {}", Self::FILE_NAME);
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

/// Log the outcome of a settings write; true when it succeeded
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn log_save_result<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            log::info!("Settings saved");
            true
        }
        Err(e) => {
            log::warn!("Failed to save settings: {:?}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "target_fps": 0 }"#);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.target_fps, 0);
        assert_eq!(settings.asset_dir, "imgs");
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        assert_eq!(Settings::from_json("{ nope"), Settings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            seed: Some(99),
            demo_frames: 10,
            ..Default::default()
        };
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_failed_save_is_reported() {
        assert!(log_save_result::<()>(Ok(())));
        assert!(!log_save_result(Err("QuotaExceededError")));
    }
}
