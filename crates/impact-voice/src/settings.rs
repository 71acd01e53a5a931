//! User-chosen voice and accessibility preferences.

use serde::{Deserialize, Serialize};

/// Text-to-speech parameters. Rate and pitch live in [0.5, 2.0], volume in
/// [0, 1]; [`VoiceSettings::clamped`] enforces the ranges before synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub enabled: bool,
    /// BCP-47 tag, e.g. `en-US`.
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 0.8,
        }
    }
}

impl VoiceSettings {
    pub fn clamped(mut self) -> Self {
        self.rate = self.rate.clamp(0.5, 2.0);
        self.pitch = self.pitch.clamp(0.5, 2.0);
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    /// Primary language subtag, e.g. `en` from `en-US`.
    pub fn language_base(&self) -> &str {
        self.language.split('-').next().unwrap_or(&self.language)
    }
}

/// Accessibility preferences mirrored by the UI overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub screen_reader_mode: bool,
    pub keyboard_navigation: bool,
    pub reduced_motion: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            large_text: false,
            screen_reader_mode: false,
            keyboard_navigation: true,
            reduced_motion: false,
        }
    }
}
