//! Voice command parsing: best-effort keyword matching over a fixed intent
//! set. Navigation resolves against the domain enum so the match is
//! exhaustive over the catalog; anything unrecognized is "no match", never an
//! error.

use impact_core::DomainId;
use serde_json::{json, Value};

/// Recognized intents, checked in order: navigation first, then help, then
/// settings. A navigation keyword without a matching domain is no match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandIntent {
    Navigate(DomainId),
    Help,
    Settings,
}

pub fn parse(command: &str) -> Option<CommandIntent> {
    let lower = command.to_lowercase();

    if lower.contains("navigate to") || lower.contains("go to") {
        return spoken_domain(&lower).map(CommandIntent::Navigate);
    }
    if lower.contains("help") || lower.contains("assistance") {
        return Some(CommandIntent::Help);
    }
    if lower.contains("settings") || lower.contains("preferences") {
        return Some(CommandIntent::Settings);
    }
    None
}

fn spoken_domain(lower: &str) -> Option<DomainId> {
    DomainId::ALL
        .into_iter()
        .find(|d| lower.contains(d.spoken_name()))
}

/// Render an intent as the client-facing result payload.
pub fn outcome(intent: &CommandIntent, command: &str, context: Option<&Value>) -> Value {
    match intent {
        CommandIntent::Navigate(domain) => json!({
            "type": "navigation",
            "action": "navigate_to_domain",
            "data": { "domain": domain.spoken_name() },
        }),
        CommandIntent::Help => json!({
            "type": "help",
            "action": "show_help",
            "data": { "context": context },
        }),
        CommandIntent::Settings => json!({
            "type": "settings",
            "action": "open_settings",
            "data": { "command": command },
        }),
    }
}

/// Parse and render in one step; `None` means the command was not recognized.
pub fn process(command: &str, context: Option<&Value>) -> Option<Value> {
    parse(command).map(|intent| outcome(&intent, command, context))
}
