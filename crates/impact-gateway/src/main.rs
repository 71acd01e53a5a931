//! Impact Hub Gateway: the `/api` surface behind the 3D navigation hub.
//! Chat turns, conversation starters, voice commands, health, and stats.
//! Every chat failure degrades to a templated reply; the client never sees an
//! upstream error.

mod commands;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use impact_core::{
    Achievement, ChatAvatar, ChatOrchestrator, ConversationLog, DomainId, ProgressLedger, Speaker,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct AppState {
    orchestrator: ChatOrchestrator,
    log: Mutex<ConversationLog>,
    ledger: Mutex<ProgressLedger>,
}

impl AppState {
    fn new(orchestrator: ChatOrchestrator) -> Self {
        Self {
            orchestrator,
            log: Mutex::new(ConversationLog::new()),
            ledger: Mutex::new(ProgressLedger::new()),
        }
    }
}

#[derive(Deserialize)]
struct ChatBody {
    message: Option<String>,
    avatar: Option<ChatAvatar>,
    #[serde(default)]
    context: Vec<String>,
    #[serde(default, rename = "systemPrompt")]
    system_prompt: Option<String>,
}

#[derive(Deserialize)]
struct SuggestionsBody {
    #[serde(rename = "avatarId")]
    avatar_id: Option<String>,
    domain: Option<String>,
    #[serde(default)]
    expertise: Vec<String>,
}

#[derive(Deserialize)]
struct CommandBody {
    command: Option<String>,
    #[serde(default)]
    context: Option<Value>,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let orchestrator = ChatOrchestrator::from_env();
    if orchestrator.is_remote() {
        info!("completion API configured; remote replies enabled");
    } else {
        info!("no completion credential; serving local fallback replies");
    }
    log_voice_status();

    let state = Arc::new(AppState::new(orchestrator));
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("impact gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind gateway port");
    axum::serve(listener, app).await.expect("serve gateway");
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/suggestions", post(suggestions_handler))
        .route("/api/voice/command", post(voice_command_handler))
        .route("/api/health", get(health_handler))
        .route("/api/stats", get(stats_handler))
        .with_state(state)
}

/// Report which speech backends the deployment has, at startup.
fn log_voice_status() {
    if impact_voice::RemoteSynthesizer::from_env().is_ok() {
        info!("TTS: remote synthesis configured");
    } else {
        info!("TTS: placeholder (set TTS_API_KEY or OPENAI_API_KEY for audio)");
    }
    if impact_voice::RemoteRecognizer::from_env().is_ok() {
        info!("STT: remote transcription configured");
    } else {
        info!("STT: client-side only (set STT_API_KEY for server transcription)");
    }
}

/// POST /api/chat: one conversation turn. Always replies; after the
/// orchestrator resolves, the turn is appended to the log and the progress
/// ledger is updated.
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> Result<Json<Value>, ApiError> {
    let message = body
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    let (message, avatar) = match (message, body.avatar) {
        (Some(m), Some(a)) => (m, a),
        _ => return Err(bad_request("Message and avatar information are required")),
    };

    let reply = state
        .orchestrator
        .send_turn(&message, &avatar, &body.context, body.system_prompt.as_deref())
        .await;

    let domain = DomainId::from_str(&avatar.domain);
    if let Some(domain) = domain {
        let mut log = state.log.lock().await;
        log.push(&avatar.id, domain, Speaker::User, &message);
        log.push(&avatar.id, domain, Speaker::Avatar, &reply.reply);
    }

    {
        let mut ledger = state.ledger.lock().await;
        ledger.record_interaction();
        if ledger.total_interactions == 1 {
            ledger.unlock_achievement(Achievement::first_chat());
        }
        if let Some(domain) = domain {
            ledger.record_domain_explored(domain);
            if ledger.all_domains_explored() {
                ledger.unlock_achievement(Achievement::domain_explorer());
            }
        }
    }

    Ok(Json(json!({
        "response": reply.reply,
        "suggestions": reply.suggestions,
    })))
}

/// POST /api/chat/suggestions: 3–5 conversation starters for one avatar.
async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SuggestionsBody>,
) -> Result<Json<Value>, ApiError> {
    let (avatar_id, domain) = match (body.avatar_id, body.domain) {
        (Some(a), Some(d)) if !a.trim().is_empty() && !d.trim().is_empty() => (a, d),
        _ => return Err(bad_request("Avatar ID and domain are required")),
    };

    let suggestions = state
        .orchestrator
        .conversation_starters(&avatar_id, &domain, &body.expertise)
        .await;

    Ok(Json(json!({ "suggestions": suggestions })))
}

/// POST /api/voice/command: best-effort keyword parsing; unknown commands
/// are `processed: false`, not errors.
async fn voice_command_handler(
    Json(body): Json<CommandBody>,
) -> Result<Json<Value>, ApiError> {
    let command = match body.command.filter(|c| !c.trim().is_empty()) {
        Some(c) => c,
        None => return Err(bad_request("Voice command is required")),
    };

    let result = commands::process(&command, body.context.as_ref());
    Ok(Json(json!({
        "processed": result.is_some(),
        "result": result,
    })))
}

/// GET /api/health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "services": {
            "ai": state.orchestrator.is_remote(),
            "voice": true,
            "storage": true,
        },
    }))
}

/// GET /api/stats: simulated platform aggregates plus live process counters.
async fn stats_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(json!({
        "totalUsers": 1250,
        "totalInteractions": 15680,
        "domainsActive": 5,
        "impactScore": 98750,
        "sessionsToday": 340,
        "averageSessionDuration": "8.5 minutes",
        "live": {
            "interactions": ledger.total_interactions,
            "domainsExplored": ledger.domains_explored.len(),
            "achievements": ledger.achievements.len(),
            "impactScore": ledger.impact_score,
        },
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(ChatOrchestrator::new(None)))
    }

    fn luna() -> ChatAvatar {
        ChatAvatar {
            id: "mental-avatar".to_string(),
            name: "Luna".to_string(),
            domain: "mental-health".to_string(),
            personality: "empathetic, supportive, understanding".to_string(),
            expertise: vec!["Emotional support".to_string(), "Mindfulness".to_string()],
        }
    }

    #[tokio::test]
    async fn chat_requires_message_and_avatar() {
        let state = test_state();
        let err = chat_handler(
            State(state.clone()),
            Json(ChatBody {
                message: None,
                avatar: Some(luna()),
                context: Vec::new(),
                system_prompt: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = chat_handler(
            State(state),
            Json(ChatBody {
                message: Some("  ".to_string()),
                avatar: Some(luna()),
                context: Vec::new(),
                system_prompt: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_replies_and_updates_the_ledger() {
        let state = test_state();
        let Json(body) = chat_handler(
            State(state.clone()),
            Json(ChatBody {
                message: Some("I feel stressed".to_string()),
                avatar: Some(luna()),
                context: Vec::new(),
                system_prompt: None,
            }),
        )
        .await
        .unwrap();

        let response = body["response"].as_str().unwrap();
        assert!(response.contains("Luna"));
        assert!(body["suggestions"].as_array().unwrap().len() <= 3);

        let ledger = state.ledger.lock().await;
        assert_eq!(ledger.total_interactions, 1);
        assert!(ledger.domains_explored.contains(&DomainId::MentalHealth));
        // first interaction unlocks the first-chat achievement
        assert!(ledger.achievements.iter().any(|a| a.id == "first-chat"));

        let log = state.log.lock().await;
        assert_eq!(log.turns().len(), 2);
        assert_eq!(log.turns()[0].author, Speaker::User);
        assert_eq!(log.turns()[1].author, Speaker::Avatar);
    }

    #[tokio::test]
    async fn exploring_every_domain_unlocks_the_explorer_achievement() {
        let state = test_state();
        for id in DomainId::ALL {
            let avatar = ChatAvatar {
                id: format!("{}-avatar", id.as_str()),
                name: "Guide".to_string(),
                domain: id.as_str().to_string(),
                personality: "helpful".to_string(),
                expertise: Vec::new(),
            };
            chat_handler(
                State(state.clone()),
                Json(ChatBody {
                    message: Some("hello".to_string()),
                    avatar: Some(avatar),
                    context: Vec::new(),
                    system_prompt: None,
                }),
            )
            .await
            .unwrap();
        }
        let ledger = state.ledger.lock().await;
        assert!(ledger.all_domains_explored());
        assert!(ledger.achievements.iter().any(|a| a.id == "domain-explorer"));
    }

    #[tokio::test]
    async fn suggestions_require_avatar_and_domain() {
        let err = suggestions_handler(
            State(test_state()),
            Json(SuggestionsBody {
                avatar_id: None,
                domain: Some("career".to_string()),
                expertise: Vec::new(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn suggestions_return_three_to_five_starters() {
        let Json(body) = suggestions_handler(
            State(test_state()),
            Json(SuggestionsBody {
                avatar_id: Some("career-avatar".to_string()),
                domain: Some("career".to_string()),
                expertise: vec!["Networking".to_string()],
            }),
        )
        .await
        .unwrap();
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!((3..=5).contains(&suggestions.len()));
    }

    #[tokio::test]
    async fn voice_command_requires_a_command() {
        let err = voice_command_handler(Json(CommandBody {
            command: None,
            context: None,
        }))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn voice_command_processes_navigation() {
        let Json(body) = voice_command_handler(Json(CommandBody {
            command: Some("navigate to education".to_string()),
            context: None,
        }))
        .await
        .unwrap();
        assert_eq!(body["processed"], true);
        assert_eq!(body["result"]["data"]["domain"], "education");
    }

    #[tokio::test]
    async fn voice_command_reports_unrecognized_as_unprocessed() {
        let Json(body) = voice_command_handler(Json(CommandBody {
            command: Some("sing me a song".to_string()),
            context: None,
        }))
        .await
        .unwrap();
        assert_eq!(body["processed"], false);
        assert!(body["result"].is_null());
    }

    #[tokio::test]
    async fn health_reports_service_flags() {
        let Json(body) = health_handler(State(test_state())).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["ai"], false);
        assert_eq!(body["services"]["storage"], true);
    }

    #[tokio::test]
    async fn stats_include_live_counters() {
        let state = test_state();
        chat_handler(
            State(state.clone()),
            Json(ChatBody {
                message: Some("hi".to_string()),
                avatar: Some(luna()),
                context: Vec::new(),
                system_prompt: None,
            }),
        )
        .await
        .unwrap();
        let Json(body) = stats_handler(State(state)).await.unwrap();
        assert_eq!(body["domainsActive"], 5);
        assert_eq!(body["live"]["interactions"], 1);
    }
}
