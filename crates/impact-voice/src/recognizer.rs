//! **Speech-to-text**: turn one spoken utterance into text.
//!
//! `listen_once` is single-shot: it blocks until one final result or an
//! error, and `stop` cancels an in-flight listen. Platforms without a capture
//! device don't implement the trait; the bridge reports
//! `UnsupportedCapability` instead.

use crate::error::{VoiceError, VoiceResult};

/// Backend producing one final transcript per listen. Implementations must be
/// cancellable via `stop`.
pub trait RecognizerBackend: Send + Sync {
    /// Block until one final recognition result. Empty string means the
    /// utterance contained no recognizable speech.
    fn listen_once(&self) -> VoiceResult<String>;

    /// Cancel an in-flight `listen_once`. No-op when idle.
    fn stop(&self);
}

/// Placeholder recognizer: returns a fixed transcript. Use for exercising the
/// voice path without a microphone or API key.
#[derive(Debug, Default)]
pub struct PlaceholderRecognizer {
    /// If set, return this instead of the default message.
    pub transcript: Option<String>,
}

impl PlaceholderRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(s: String) -> Self {
        Self { transcript: Some(s) }
    }
}

impl RecognizerBackend for PlaceholderRecognizer {
    fn listen_once(&self) -> VoiceResult<String> {
        Ok(self
            .transcript
            .clone()
            .unwrap_or_else(|| "[recognizer placeholder: connect a speech backend]".to_string()))
    }

    fn stop(&self) {}
}

/// Remote transcription over an OpenAI-compatible `audio/transcriptions`
/// endpoint. Has no capture device of its own: callers record audio with the
/// platform API and hand over WAV bytes.
#[derive(Debug, Clone)]
pub struct RemoteRecognizer {
    /// Base URL without trailing slash (e.g. https://api.openai.com/v1).
    pub base_url: String,
    pub api_key: String,
    /// Model: whisper-1 or gpt-4o-transcribe, etc.
    pub model: String,
    client: reqwest::blocking::Client,
}

impl RemoteRecognizer {
    /// Build from environment: STT_API_URL, STT_API_KEY (or OPENAI_API_KEY), STT_MODEL.
    pub fn from_env() -> VoiceResult<Self> {
        let base_url = std::env::var("STT_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("STT_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| VoiceError::Config("STT requires STT_API_KEY or OPENAI_API_KEY".to_string()))?;
        let model = std::env::var("STT_MODEL").unwrap_or_else(|_| "whisper-1".to_string());
        Self::new(base_url, api_key, model)
    }

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> VoiceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    /// Transcribe recorded WAV bytes.
    pub fn transcribe_wav(&self, wav: Vec<u8>) -> VoiceResult<String> {
        if wav.is_empty() {
            return Ok(String::new());
        }
        let url = format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'));
        let part = reqwest::blocking::multipart::Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(VoiceError::Recognition(format!("STT API error {}: {}", status, body)));
        }
        let json: serde_json::Value = res
            .json()
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;
        Ok(json
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .trim()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_returns_message() {
        let stt = PlaceholderRecognizer::new();
        let s = stt.listen_once().unwrap();
        assert!(s.contains("recognizer placeholder"));
    }

    #[test]
    fn placeholder_with_transcript() {
        let stt = PlaceholderRecognizer::with_transcript("hello world".to_string());
        assert_eq!(stt.listen_once().unwrap(), "hello world");
    }

    #[test]
    fn empty_wav_transcribes_to_empty() {
        let stt = RemoteRecognizer::new("https://api.openai.com/v1", "sk-test", "whisper-1").unwrap();
        assert_eq!(stt.transcribe_wav(Vec::new()).unwrap(), "");
    }
}
