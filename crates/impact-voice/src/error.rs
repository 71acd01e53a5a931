//! Error types for the voice bridge

use thiserror::Error;

/// Result type alias for voice operations
pub type VoiceResult<T> = Result<T, VoiceError>;

/// Errors that can occur in the voice bridge
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("speech capability not available on this platform")]
    UnsupportedCapability,

    #[error("speech recognition error: {0}")]
    Recognition(String),

    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    #[error("voice configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
