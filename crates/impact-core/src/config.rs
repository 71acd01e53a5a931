//! User-level configuration stored in `user_config.toml`.
//!
//! Lets a self-hosted deployment carry its own completion-API key and model
//! without touching the environment. Every getter falls back to env vars, so
//! `.env` alone is enough in development.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Completion-API key (OpenAI or compatible).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Preferred completion model.
    #[serde(default)]
    pub model: Option<String>,
    /// Base URL of an OpenAI-compatible API.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl UserConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from("user_config.toml")
    }

    /// Load from the default path; a missing file yields the defaults.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::default_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Key priority: user_config.toml > OPENAI_API_KEY.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn get_model(&self) -> Option<String> {
        self.model
            .clone()
            .or_else(|| std::env::var("IMPACT_LLM_MODEL").ok())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn get_api_url(&self) -> Option<String> {
        self.api_url
            .clone()
            .or_else(|| std::env::var("IMPACT_LLM_API_URL").ok())
            .filter(|s| !s.trim().is_empty())
    }
}
