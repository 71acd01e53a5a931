//! Conversation orchestration.
//!
//! `ChatOrchestrator` owns the two-tier reply contract: try the remote
//! completion API, and on a missing key or any upstream failure degrade to a
//! deterministic templated reply. The public surface never errors: the
//! user-visible promise is "always get a reply".
//!
//! The orchestrator performs no storage; callers append turns to a
//! [`ConversationLog`] and update the [`crate::progress::ProgressLedger`]
//! after a call resolves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::bridge::OpenAiBridge;
use crate::prompts;
use crate::registry::{self, DomainId};

/// Number of prior turns sent as completion context.
pub const CONTEXT_TURNS: usize = 5;
/// Follow-up suggestions are capped at three.
pub const MAX_SUGGESTIONS: usize = 3;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Avatar,
}

/// One message exchanged between the user and an avatar. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub avatar_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: Speaker,
    pub domain: DomainId,
}

/// Append-only conversation history, passed explicitly to whoever needs it.
/// Timestamps are clamped so they never decrease within the log.
#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        avatar_id: &str,
        domain: DomainId,
        author: Speaker,
        content: &str,
    ) -> &ConversationTurn {
        let mut timestamp = Utc::now();
        if let Some(last) = self.turns.last() {
            if timestamp < last.timestamp {
                timestamp = last.timestamp;
            }
        }
        self.turns.push(ConversationTurn {
            id: Uuid::new_v4(),
            avatar_id: avatar_id.to_string(),
            content: content.to_string(),
            timestamp,
            author,
            domain,
        });
        self.turns.last().expect("just pushed")
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn for_avatar<'a>(&'a self, avatar_id: &str) -> Vec<&'a ConversationTurn> {
        self.turns
            .iter()
            .filter(|t| t.avatar_id == avatar_id)
            .collect()
    }

    /// Last `n` turns for one avatar, rendered `"<speaker>: <text>"` the way
    /// the completion context expects them.
    pub fn recent_context(&self, avatar_id: &str, avatar_name: &str, n: usize) -> Vec<String> {
        let turns = self.for_avatar(avatar_id);
        turns
            .iter()
            .rev()
            .take(n)
            .rev()
            .map(|t| match t.author {
                Speaker::User => format!("User: {}", t.content),
                Speaker::Avatar => format!("{}: {}", avatar_name, t.content),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// Avatar persona fields as the chat client sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAvatar {
    pub id: String,
    pub name: String,
    /// Domain catalog key, e.g. `mental-health`.
    pub domain: String,
    pub personality: String,
    #[serde(default)]
    pub expertise: Vec<String>,
}

impl ChatAvatar {
    /// Lower-case domain label with the dash spelled out, e.g. `mental health`.
    fn domain_label(&self) -> String {
        self.domain.to_lowercase().replace('-', " ")
    }
}

/// Reply plus 0–3 follow-up suggestions. Every failure path still produces one.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub suggestions: Vec<String>,
}

/// Turns a user message plus active avatar into a reply, tolerating upstream
/// failure. Holds the remote bridge when a credential is configured.
pub struct ChatOrchestrator {
    bridge: Option<OpenAiBridge>,
}

impl ChatOrchestrator {
    pub fn new(bridge: Option<OpenAiBridge>) -> Self {
        Self { bridge }
    }

    pub fn from_env() -> Self {
        Self::new(OpenAiBridge::from_env())
    }

    /// True when a completion credential is configured.
    pub fn is_remote(&self) -> bool {
        self.bridge.is_some()
    }

    /// Produce a reply for `message` in the voice of `avatar`.
    ///
    /// `context` is the rendered recent history (up to [`CONTEXT_TURNS`]
    /// lines); `system_prompt` overrides the generated persona instruction
    /// when the client supplies its own. Never fails.
    pub async fn send_turn(
        &self,
        message: &str,
        avatar: &ChatAvatar,
        context: &[String],
        system_prompt: Option<&str>,
    ) -> ChatReply {
        let bridge = match &self.bridge {
            Some(b) => b,
            None => return self.local_fallback(message, avatar),
        };

        let system = match system_prompt {
            Some(s) => s.to_string(),
            None => self.persona_prompt(avatar),
        };

        let reply = match bridge.complete(&system, context, message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(avatar = %avatar.id, error = %e, "completion failed, using local fallback");
                return self.local_fallback(message, avatar);
            }
        };

        let prompt = prompts::suggestion_prompt(
            &avatar.name,
            &avatar.domain,
            &avatar.expertise,
            message,
            &reply,
        );
        let suggestions = match bridge.suggestions(&prompt).await {
            Ok(list) => {
                let mut list: Vec<String> =
                    list.into_iter().take(MAX_SUGGESTIONS).collect();
                if list.is_empty() {
                    list = followup_suggestions(&avatar.domain_label());
                }
                list
            }
            Err(e) => {
                warn!(avatar = %avatar.id, error = %e, "suggestion call failed, using templates");
                followup_suggestions(&avatar.domain_label())
            }
        };

        ChatReply { reply, suggestions }
    }

    /// Conversation starters for one avatar/domain: 3–5 non-empty strings,
    /// regardless of network outcome. `avatar_id` is carried for parity with
    /// the HTTP surface; the starters depend only on domain and expertise.
    pub async fn conversation_starters(
        &self,
        _avatar_id: &str,
        domain: &str,
        expertise: &[String],
    ) -> Vec<String> {
        let label = domain.to_lowercase().replace('-', " ");
        let bridge = match &self.bridge {
            Some(b) => b,
            None => return local_starters(&label),
        };

        let prompt = prompts::starters_prompt(domain, expertise);
        match bridge.starters(&prompt).await {
            Ok(list) => {
                let list: Vec<String> = list.into_iter().take(5).collect();
                if list.len() < 3 {
                    fallback_starters(&label)
                } else {
                    list
                }
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "starter call failed, using templates");
                fallback_starters(&label)
            }
        }
    }

    /// Deterministic reply built entirely from the avatar persona and the
    /// user's message. Used whenever the remote tier is absent or fails.
    fn local_fallback(&self, message: &str, avatar: &ChatAvatar) -> ChatReply {
        let specialty = avatar.domain.replace('-', " ");
        let expertise = avatar
            .expertise
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let reply = format!(
            "I am {}, your {} specialist. Here is how I can help: {}. \
You said: \"{}\". Let's start with one practical next step.",
            avatar.name, specialty, expertise, message
        );
        let label = avatar.domain_label();
        let suggestions = vec![
            format!("Give me a quick tip in {label}"),
            "Share a resource to get started".to_string(),
            "What should I do next this week?".to_string(),
        ];
        ChatReply { reply, suggestions }
    }

    /// Persona instruction: catalog data when the avatar id is known,
    /// otherwise built from the wire fields alone.
    fn persona_prompt(&self, avatar: &ChatAvatar) -> String {
        if let Some(domain) = registry::find_domain_by_avatar_id(&avatar.id) {
            return prompts::system_prompt_for(&domain.avatar);
        }
        let domain_name = DomainId::from_str(&avatar.domain)
            .map(|d| d.display_name().to_string())
            .unwrap_or_else(|| avatar.domain.clone());
        prompts::system_prompt(
            &avatar.name,
            &domain_name,
            &avatar.personality,
            &avatar.personality,
            &avatar.expertise,
        )
    }
}

/// Templated follow-ups when the suggestion call is skipped or fails.
fn followup_suggestions(label: &str) -> Vec<String> {
    vec![
        format!("Tell me more about {label}"),
        "How can I get started today?".to_string(),
        format!("Any resources for {label}?"),
    ]
}

/// Starters when no credential is configured.
fn local_starters(label: &str) -> Vec<String> {
    vec![
        format!("How can you help me with {label}?"),
        format!("I'm new to {label}, where should I start?"),
        "Give me a simple plan for the next 7 days.".to_string(),
    ]
}

/// Starters when the remote call fails or comes back too short.
fn fallback_starters(label: &str) -> Vec<String> {
    vec![
        format!("How can you help me with {label}?"),
        format!("I'm new to {label}, where should I start?"),
        format!("What's the most important thing to know about {label}?"),
        "Can you give me some practical tips?".to_string(),
        "What resources would you recommend?".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luna() -> ChatAvatar {
        ChatAvatar {
            id: "mental-avatar".to_string(),
            name: "Luna".to_string(),
            domain: "mental-health".to_string(),
            personality: "empathetic, supportive, understanding".to_string(),
            expertise: vec![
                "Emotional support".to_string(),
                "Stress management".to_string(),
                "Mindfulness".to_string(),
                "Coping strategies".to_string(),
            ],
        }
    }

    #[tokio::test]
    async fn offline_reply_names_avatar_and_expertise() {
        let orchestrator = ChatOrchestrator::new(None);
        let reply = orchestrator.send_turn("X", &luna(), &[], None).await;
        assert!(reply.reply.contains("Luna"));
        assert!(reply.reply.contains("mental health specialist"));
        assert!(reply.reply.contains("Emotional support"));
        assert!(reply.reply.contains("You said: \"X\""));
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn offline_starters_are_three_to_five() {
        let orchestrator = ChatOrchestrator::new(None);
        let starters = orchestrator
            .conversation_starters("mental-avatar", "mental-health", &[])
            .await;
        assert!((3..=5).contains(&starters.len()));
        assert!(starters.iter().all(|s| !s.is_empty()));
        assert!(starters[0].contains("mental health"));
    }

    #[test]
    fn log_keeps_timestamps_non_decreasing() {
        let mut log = ConversationLog::new();
        for i in 0..4 {
            log.push(
                "mental-avatar",
                DomainId::MentalHealth,
                if i % 2 == 0 { Speaker::User } else { Speaker::Avatar },
                &format!("turn {i}"),
            );
        }
        let times: Vec<_> = log.turns().iter().map(|t| t.timestamp).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn recent_context_renders_speaker_labels() {
        let mut log = ConversationLog::new();
        log.push("mental-avatar", DomainId::MentalHealth, Speaker::User, "hi");
        log.push("mental-avatar", DomainId::MentalHealth, Speaker::Avatar, "hello");
        log.push("env-avatar", DomainId::Environment, Speaker::User, "other avatar");
        let ctx = log.recent_context("mental-avatar", "Luna", CONTEXT_TURNS);
        assert_eq!(ctx, vec!["User: hi".to_string(), "Luna: hello".to_string()]);
    }

    #[test]
    fn recent_context_keeps_only_latest_turns() {
        let mut log = ConversationLog::new();
        for i in 0..8 {
            log.push("edu-avatar", DomainId::Education, Speaker::User, &format!("m{i}"));
        }
        let ctx = log.recent_context("edu-avatar", "Sophia", CONTEXT_TURNS);
        assert_eq!(ctx.len(), CONTEXT_TURNS);
        assert_eq!(ctx.last().unwrap(), "User: m7");
        assert_eq!(ctx.first().unwrap(), "User: m3");
    }

    #[test]
    fn clear_resets_history() {
        let mut log = ConversationLog::new();
        log.push("edu-avatar", DomainId::Education, Speaker::User, "hi");
        log.clear();
        assert!(log.turns().is_empty());
    }
}
