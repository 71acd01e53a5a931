//! Impact Hub: core library.
//! Domain/avatar registry, conversation orchestration with a two-tier
//! remote/local fallback, and the engagement progress ledger.

pub mod bridge;
pub mod config;
pub mod orchestrator;
pub mod progress;
pub mod prompts;
pub mod registry;

pub use bridge::{BridgeError, OpenAiBridge};
pub use config::UserConfig;
pub use orchestrator::{
    ChatAvatar, ChatOrchestrator, ChatReply, ConversationLog, ConversationTurn, Speaker,
};
pub use progress::{Achievement, AchievementCategory, ProgressLedger};
pub use registry::{Avatar, Domain, DomainId};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
