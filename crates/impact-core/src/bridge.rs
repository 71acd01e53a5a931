//! OpenAI completion bridge.
//!
//! One thin reqwest client over the `chat/completions` endpoint. The bridge
//! reports errors faithfully; the [`crate::orchestrator`] layer is what turns
//! them into local fallback replies, so nothing here should ever reach an end
//! user directly.
//!
//! API key: `user_config.toml` first, then `OPENAI_API_KEY` in `.env`.
//! Default model: `gpt-4o`.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::UserConfig;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
/// Scaffold value some deployments ship in `.env`; treated as unconfigured.
const PLACEHOLDER_KEY: &str = "your-openai-api-key";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed completion payload: {0}")]
    Malformed(String),
}

// OpenAI-compatible request/response shapes
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Deserialize)]
struct ChatMessageBody {
    content: Option<String>,
}

/// Client for one OpenAI-compatible completion endpoint.
pub struct OpenAiBridge {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiBridge {
    /// Build from user config and environment. Returns `None` when no usable
    /// key is present: callers treat that as "run local-only", not an error.
    pub fn from_env() -> Option<Self> {
        let config = UserConfig::load().unwrap_or_default();
        let key = config.get_api_key()?;
        if key.is_empty() || key == PLACEHOLDER_KEY {
            return None;
        }
        let mut bridge = Self::new(key);
        if let Some(model) = config.get_model() {
            bridge.model = model;
        }
        if let Some(url) = config.get_api_url() {
            bridge.base_url = url.trim_end_matches('/').to_string();
        }
        Some(bridge)
    }

    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.trim().to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENAI_API_BASE.to_string(),
            client,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, BridgeError> {
        let url = format!("{}/chat/completions", self.base_url);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(BridgeError::Api { status, body });
        }

        let parsed: ChatResponse = res
            .json()
            .await
            .map_err(|e| BridgeError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| BridgeError::Malformed("empty assistant message".to_string()))
    }

    /// One in-character completion: system persona, prior turns as assistant
    /// context lines, then the new user message.
    pub async fn complete(
        &self,
        system_prompt: &str,
        context: &[String],
        user_message: &str,
    ) -> Result<String, BridgeError> {
        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.push(ChatMessage {
            role: "system",
            content: system_prompt.to_string(),
        });
        for line in context {
            messages.push(ChatMessage {
                role: "assistant",
                content: line.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user_message.to_string(),
        });

        self.chat(ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 500,
            presence_penalty: Some(0.1),
            frequency_penalty: Some(0.1),
            response_format: None,
        })
        .await
    }

    /// Up to 3 follow-up suggestions for a just-completed exchange.
    pub async fn suggestions(&self, prompt: &str) -> Result<Vec<String>, BridgeError> {
        let raw = self
            .chat(ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                }],
                temperature: 0.8,
                max_tokens: 200,
                presence_penalty: None,
                frequency_penalty: None,
                response_format: Some(ResponseFormat { kind: "json_object" }),
            })
            .await?;
        parse_string_list(&raw, "suggestions")
    }

    /// 5 conversation starters for a domain specialist.
    pub async fn starters(&self, prompt: &str) -> Result<Vec<String>, BridgeError> {
        let raw = self
            .chat(ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                }],
                temperature: 0.9,
                max_tokens: 300,
                presence_penalty: None,
                frequency_penalty: None,
                response_format: Some(ResponseFormat { kind: "json_object" }),
            })
            .await?;
        parse_string_list(&raw, "starters")
    }
}

/// Extract a list of non-empty strings from `{"<key>": [...]}`. A bare JSON
/// array is accepted too; some models return one despite the object format.
fn parse_string_list(raw: &str, key: &str) -> Result<Vec<String>, BridgeError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| BridgeError::Malformed(format!("suggestion JSON: {e}")))?;
    let array = match &value {
        serde_json::Value::Array(a) => a.as_slice(),
        serde_json::Value::Object(o) => o
            .get(key)
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .ok_or_else(|| BridgeError::Malformed(format!("missing \"{key}\" array")))?,
        _ => return Err(BridgeError::Malformed(format!("expected \"{key}\" array"))),
    };
    Ok(array
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
