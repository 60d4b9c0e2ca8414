//! Game settings and preferences
//!
//! Persisted in LocalStorage, separately from anything gameplay-related.

use serde::{Deserialize, Serialize};

/// Background detail presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DetailPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl DetailPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailPreset::Low => "Low",
            DetailPreset::Medium => "Medium",
            DetailPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(DetailPreset::Low),
            "medium" | "med" => Some(DetailPreset::Medium),
            "high" => Some(DetailPreset::High),
            _ => None,
        }
    }

    /// Number of cloud/snowflake sprites per background layer
    pub fn scenery_count(&self) -> usize {
        match self {
            DetailPreset::Low => 3,
            DetailPreset::Medium => 8,
            DetailPreset::High => 16,
        }
    }

    /// Whether the far parallax layer (hills/peaks) is drawn
    pub fn far_layer_enabled(&self) -> bool {
        match self {
            DetailPreset::Low => false,
            DetailPreset::Medium => true,
            DetailPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background detail preset
    pub detail: DetailPreset,

    // === Visual Effects ===
    /// Screen shake when the earthquake power-up goes off
    pub screen_shake: bool,
    /// Decorative background scenery (clouds, snowfall)
    pub scenery: bool,
    /// Glow outline on the player while a power-up is held
    pub powerup_glow: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no parallax drift)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detail: DetailPreset::Medium,

            screen_shake: true,
            scenery: true,
            powerup_glow: true,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Apply a detail preset (updates detail-dependent settings)
    pub fn apply_preset(&mut self, preset: DetailPreset) {
        self.detail = preset;

        // Low preset drops the decorations entirely
        if preset == DetailPreset::Low {
            self.scenery = false;
            self.powerup_glow = false;
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective scenery sprite count
    pub fn scenery_count(&self) -> usize {
        if !self.scenery {
            0
        } else {
            self.detail.scenery_count()
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "cookie_raccoon_settings";

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
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!(DetailPreset::from_str("high"), Some(DetailPreset::High));
        assert_eq!(DetailPreset::from_str("MED"), Some(DetailPreset::Medium));
        assert_eq!(DetailPreset::from_str("potato"), None);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_low_preset_drops_scenery() {
        let mut settings = Settings::default();
        settings.apply_preset(DetailPreset::Low);
        assert_eq!(settings.scenery_count(), 0);
        assert!(!settings.detail.far_layer_enabled());
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut settings = Settings::default();
        settings.master_volume = 0.5;
        settings.detail = DetailPreset::High;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.master_volume, 0.5);
        assert_eq!(back.detail, DetailPreset::High);
    }
}
