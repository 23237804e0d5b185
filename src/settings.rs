//! Game settings and preferences
//!
//! Persisted in LocalStorage; the page URL can override the variant and seed
//! (`?variant=platformer&seed=42`).

use serde::{Deserialize, Serialize};

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameVariant {
    /// Endless side-scroller
    #[default]
    Runner,
    /// Follow-cam platformer
    Platformer,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Runner => "Runner",
            GameVariant::Platformer => "Platformer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "runner" | "run" => Some(GameVariant::Runner),
            "platformer" | "platform" => Some(GameVariant::Platformer),
            _ => None,
        }
    }

    /// Key hint shown in the HUD
    pub fn instructions(&self) -> &'static str {
        match self {
            GameVariant::Runner => "SPACE/UP/W/X to JUMP!",
            GameVariant::Platformer => "LEFT/RIGHT or A/D to move, SPACE/UP/W to JUMP!",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Game to start with
    pub variant: GameVariant,

    // === Accessibility ===
    /// Reduced motion (no cloud parallax, no coin spin)
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::Runner,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

/// Overrides parsed from a URL query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOverrides {
    pub variant: Option<GameVariant>,
    pub seed: Option<u64>,
}

impl QueryOverrides {
    /// Parse `?key=value&...`; unknown keys and bad values are ignored
    pub fn parse(query: &str) -> Self {
        let mut overrides = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "variant" => match GameVariant::from_str(value) {
                    Some(v) => overrides.variant = Some(v),
                    None => log::warn!("Ignoring unknown variant '{}'", value),
                },
                "seed" => match value.parse() {
                    Ok(seed) => overrides.seed = Some(seed),
                    Err(_) => log::warn!("Ignoring bad seed '{}'", value),
                },
                _ => {}
            }
        }
        overrides
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "frog_hop_settings";

    /// Apply URL overrides on top of stored settings
    pub fn apply_overrides(&mut self, overrides: &QueryOverrides) {
        if let Some(variant) = overrides.variant {
            self.variant = variant;
        }
    }

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Stored settings unreadable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::get(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(json) = self.to_json() {
            crate::platform::storage::set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
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
