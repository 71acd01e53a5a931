//! # Impact Voice: speech bridge for the hub
//!
//! Thin pass-through between the hub and whatever speech capability the
//! deployment has: a placeholder for tests, or OpenAI-compatible remote
//! transcription/synthesis. The platform's own capture and playback are
//! external collaborators; this crate only defines the seam.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     VoiceBridge                      │
//! │  ┌───────────────────┐      ┌──────────────────────┐ │
//! │  │ RecognizerBackend │      │  SynthesizerBackend  │ │
//! │  │ (listen → text)   │      │  (text → audio)      │ │
//! │  └───────────────────┘      └──────────────────────┘ │
//! │        placeholder / remote, chosen from env         │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod recognizer;
pub mod settings;
pub mod synthesizer;

pub use error::{VoiceError, VoiceResult};
pub use recognizer::{PlaceholderRecognizer, RecognizerBackend, RemoteRecognizer};
pub use settings::{AccessibilitySettings, VoiceSettings};
pub use synthesizer::{
    create_best_synthesizer, PlaceholderSynthesizer, RemoteSynthesizer, SynthesizerBackend,
    VoiceBridge,
};
