//! Player preferences
//!
//! Read from LocalStorage, separately from the high score. Edit the
//! `color_catch_settings` entry to rebind keys.

use serde::{Deserialize, Serialize};

use crate::sim::Command;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Keys that cycle the player color backward (matched case-insensitively)
    pub cycle_backward_keys: Vec<String>,
    /// Keys that cycle the player color forward
    pub cycle_forward_keys: Vec<String>,
    /// Key that toggles the autopilot
    pub autopilot_key: String,

    // === Visual Effects ===
    /// Full-screen flash on catch / life lost
    pub flash_overlay: bool,

    // === Accessibility ===
    /// Reduced motion (dims flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cycle_backward_keys: vec!["z".to_string(), "ArrowLeft".to_string()],
            cycle_forward_keys: vec!["x".to_string(), "ArrowRight".to_string()],
            autopilot_key: "i".to_string(),

            flash_overlay: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Color command bound to `key`, if any
    pub fn command_for_key(&self, key: &str) -> Option<Command> {
        let bound = |keys: &[String]| keys.iter().any(|k| k.eq_ignore_ascii_case(key));
        if bound(self.cycle_backward_keys.as_slice()) {
            Some(Command::CycleBackward)
        } else if bound(self.cycle_forward_keys.as_slice()) {
            Some(Command::CycleForward)
        } else {
            None
        }
    }

    pub fn is_autopilot_key(&self, key: &str) -> bool {
        self.autopilot_key.eq_ignore_ascii_case(key)
    }

    /// Peak flash opacity (respects flash_overlay and reduced_motion)
    pub fn flash_intensity(&self) -> f32 {
        if !self.flash_overlay {
            0.0
        } else if self.reduced_motion {
            0.5
        } else {
            1.0
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "color_catch_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
