//! Portal settings and preferences
//!
//! Persisted in LocalStorage as JSON. Missing fields fall back to defaults so
//! older saved settings keep loading after new options are added.

use serde::{Deserialize, Serialize};

use crate::audio::Mix;
use crate::layout::HelixParams;
use crate::particles::{BURST_PARTICLE_COUNT, UNLOCK_PARTICLE_COUNT};

/// Particles per hover emitter at medium quality
pub const HOVER_PARTICLE_COUNT: usize = 12;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset for the quality toggle (wraps around)
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Particle count multiplier relative to medium
    pub fn particle_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }

    /// Whether the ambient drone runs by default
    pub fn ambient_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Portal settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle bursts and hover sparkles
    pub particles: bool,
    /// Card tilt following the pointer
    pub card_tilt: bool,
    /// Vault helix tuning
    pub helix: HelixParams,

    // === Feedback ===
    /// Vibration on supported devices
    pub haptics: bool,
    /// Looping ambient drone
    pub ambient_audio: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the tab is hidden
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no particles, no tilt, instant entrance)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            card_tilt: true,
            helix: HelixParams::default(),

            haptics: true,
            ambient_audio: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.ambient_audio = preset.ambient_enabled();
    }

    /// Step to the next quality preset and return it
    pub fn cycle_quality(&mut self) -> QualityPreset {
        self.apply_preset(self.quality.next());
        self.quality
    }

    /// Whether the ambient drone should be playing
    pub fn ambient_wanted(&self, tab_hidden: bool) -> bool {
        self.ambient_audio && !(tab_hidden && self.mute_on_blur)
    }

    fn scaled_count(&self, base: usize) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            (base as f32 * self.quality.particle_scale()).round() as usize
        }
    }

    /// Gateway burst size
    pub fn burst_count(&self) -> usize {
        self.scaled_count(BURST_PARTICLE_COUNT)
    }

    /// Vault unlock burst size
    pub fn unlock_count(&self) -> usize {
        self.scaled_count(UNLOCK_PARTICLE_COUNT)
    }

    /// Hover emitter size
    pub fn hover_count(&self) -> usize {
        self.scaled_count(HOVER_PARTICLE_COUNT)
    }

    /// Effective card tilt (respects reduced_motion)
    pub fn effective_card_tilt(&self) -> bool {
        self.card_tilt && !self.reduced_motion
    }

    /// Helix params with the entrance stagger removed under reduced motion
    pub fn effective_helix(&self) -> HelixParams {
        let mut helix = self.helix.clone();
        if self.reduced_motion {
            helix.delay_step = 0.0;
        }
        helix
    }

    pub fn mix(&self) -> Mix {
        Mix {
            master_volume: self.master_volume,
            sfx_volume: self.sfx_volume,
            muted: false,
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "helix_portal_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
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
