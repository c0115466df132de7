//! Game settings and preferences
//!
//! Stored as JSON next to the executable's working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{TIME_SCALE_MAX, TIME_SCALE_MIN};

/// Default settings file name
pub const SETTINGS_FILE: &str = "star_cadet_settings.json";
/// Environment variable overriding the settings path
pub const SETTINGS_ENV: &str = "STAR_CADET_SETTINGS";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, exhaust, scan rings)
    pub particles: bool,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Simulation ===
    /// Seed for every random source in the game
    pub seed: u64,
    /// Initial solar-system time scale
    pub time_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            sfx_volume: 0.7,
            music_volume: 0.5,
            muted: false,
            seed: 0x5EED,
            time_scale: 1.0,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Clamp every numeric field into its documented range
    pub fn sanitized(mut self) -> Self {
        self.sfx_volume = clamp_unit(self.sfx_volume);
        self.music_volume = clamp_unit(self.music_volume);
        self.time_scale = if self.time_scale.is_nan() {
            1.0
        } else {
            self.time_scale.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX)
        };
        self
    }

    /// Settings path, honouring the env override
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Missing or malformed files fall back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::path());
    }

    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save settings: {e}"),
            },
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
