//! **Text-to-speech** and the bridge facade.
//!
//! A `SynthesizerBackend` turns text into audio bytes; `VoiceBridge` wraps a
//! synthesizer plus an optional recognizer and enforces the contract the hub
//! relies on: disabled settings short-circuit to success, a new utterance
//! cancels the previous one, and listening without a recognizer reports
//! `UnsupportedCapability`.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{VoiceError, VoiceResult};
use crate::recognizer::RecognizerBackend;
use crate::settings::VoiceSettings;

/// Backend that turns text into audio bytes (WAV/MP3). Return an empty vec to
/// skip playback.
pub trait SynthesizerBackend: Send + Sync {
    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> VoiceResult<Vec<u8>>;
}

/// Placeholder TTS: produces no audio. Use for testing the bridge contract.
#[derive(Debug, Default)]
pub struct PlaceholderSynthesizer;

impl SynthesizerBackend for PlaceholderSynthesizer {
    fn synthesize(&self, _text: &str, _settings: &VoiceSettings) -> VoiceResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Map a settings language to a default OpenAI TTS voice.
fn language_to_voice(language_base: &str) -> &'static str {
    // Voice names are accent-neutral; only a coarse warm/neutral split is useful.
    match language_base {
        "en" => "alloy",
        "es" | "pt" | "it" => "shimmer",
        "de" | "nl" => "onyx",
        "fr" => "echo",
        _ => "alloy",
    }
}

/// Production TTS backend: OpenAI-compatible `audio/speech` endpoint.
/// Uses `TTS_API_URL` and `TTS_API_KEY` (or `OPENAI_API_KEY`).
#[derive(Debug, Clone)]
pub struct RemoteSynthesizer {
    /// Base URL without trailing slash (e.g. https://api.openai.com/v1).
    pub base_url: String,
    pub api_key: String,
    /// TTS model: tts-1 (fast) or tts-1-hd (higher quality).
    pub model: String,
    /// Override voice (alloy, echo, onyx, shimmer, ...). If None, derived from
    /// the settings language.
    pub voice_override: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteSynthesizer {
    /// Build from environment: TTS_API_URL, TTS_API_KEY (or OPENAI_API_KEY), TTS_MODEL.
    pub fn from_env() -> VoiceResult<Self> {
        let base_url = std::env::var("TTS_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("TTS_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| VoiceError::Config("TTS requires TTS_API_KEY or OPENAI_API_KEY".to_string()))?;
        let model = std::env::var("TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string());
        Self::new(base_url, api_key, model)
    }

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> VoiceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| VoiceError::Synthesis(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            voice_override: None,
            client,
        })
    }

    pub fn with_voice(mut self, voice: &str) -> Self {
        self.voice_override = Some(voice.to_string());
        self
    }
}

impl SynthesizerBackend for RemoteSynthesizer {
    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> VoiceResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let voice = self
            .voice_override
            .as_deref()
            .unwrap_or_else(|| language_to_voice(settings.language_base()));
        let url = format!("{}/audio/speech", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
            "voice": voice,
            "speed": settings.rate,
        });
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| VoiceError::Synthesis(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(VoiceError::Synthesis(format!("TTS API error {}: {}", status, body)));
        }
        let bytes = res.bytes().map_err(|e| VoiceError::Synthesis(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Best available synthesizer from environment: remote when a TTS credential
/// is set, placeholder otherwise.
pub fn create_best_synthesizer() -> Box<dyn SynthesizerBackend> {
    match RemoteSynthesizer::from_env() {
        Ok(remote) => {
            tracing::info!(model = %remote.model, "using remote TTS backend");
            Box::new(remote)
        }
        Err(e) => {
            tracing::debug!("no remote TTS: {e}");
            Box::new(PlaceholderSynthesizer)
        }
    }
}

/// Facade over one synthesizer and an optional recognizer.
pub struct VoiceBridge {
    synthesizer: Box<dyn SynthesizerBackend>,
    recognizer: Option<Box<dyn RecognizerBackend>>,
    speaking: AtomicBool,
}

impl VoiceBridge {
    pub fn new(synthesizer: Box<dyn SynthesizerBackend>) -> Self {
        Self {
            synthesizer,
            recognizer: None,
            speaking: AtomicBool::new(false),
        }
    }

    /// Bridge wired entirely from the environment.
    pub fn from_env() -> Self {
        Self::new(create_best_synthesizer())
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn RecognizerBackend>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// True when single-shot recognition is available.
    pub fn recognition_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Synthesize `text` and return the audio bytes for playback.
    ///
    /// Disabled settings resolve immediately without touching the backend.
    /// Any in-flight utterance is cancelled before the new one starts.
    /// Settings are clamped to their valid ranges first.
    pub fn speak(&self, text: &str, settings: &VoiceSettings) -> VoiceResult<Vec<u8>> {
        if !settings.enabled {
            return Ok(Vec::new());
        }
        self.stop_speaking();
        let clamped = settings.clone().clamped();
        self.speaking.store(true, Ordering::SeqCst);
        let result = self.synthesizer.synthesize(text, &clamped);
        self.speaking.store(false, Ordering::SeqCst);
        result
    }

    /// Cancel the current utterance, if any.
    pub fn stop_speaking(&self) {
        self.speaking.store(false, Ordering::SeqCst);
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Single-shot speech-to-text. Fails with `UnsupportedCapability` when no
    /// recognizer is wired.
    pub fn listen_once(&self) -> VoiceResult<String> {
        match &self.recognizer {
            Some(r) => r.listen_once(),
            None => Err(VoiceError::UnsupportedCapability),
        }
    }

    /// Cancel an in-flight listen. No-op without a recognizer.
    pub fn stop_listening(&self) {
        if let Some(r) = &self.recognizer {
            r.stop();
        }
    }
}
