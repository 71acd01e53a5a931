//! Contract tests for the never-fail reply surface: with no completion
//! credential configured, every operation still resolves to usable text.

use impact_core::{registry, ChatAvatar, ChatOrchestrator, DomainId};

fn wire_avatar(id: DomainId) -> ChatAvatar {
    let avatar = registry::avatar_for(id);
    ChatAvatar {
        id: avatar.id.to_string(),
        name: avatar.name.to_string(),
        domain: id.as_str().to_string(),
        personality: avatar.personality.to_string(),
        expertise: avatar.expertise.iter().map(|e| e.to_string()).collect(),
    }
}

#[tokio::test]
async fn every_avatar_gets_a_non_empty_reply() {
    let orchestrator = ChatOrchestrator::new(None);
    for id in DomainId::ALL {
        let avatar = wire_avatar(id);
        let reply = orchestrator
            .send_turn("What should I focus on first?", &avatar, &[], None)
            .await;
        assert!(!reply.reply.is_empty(), "empty reply for {}", avatar.id);
        assert!(reply.reply.contains(&avatar.name));
        assert!(reply.suggestions.len() <= 3);
        assert!(reply.suggestions.iter().all(|s| !s.is_empty()));
    }
}

#[tokio::test]
async fn fallback_reply_echoes_expertise() {
    let orchestrator = ChatOrchestrator::new(None);
    let avatar = wire_avatar(DomainId::Education);
    let reply = orchestrator.send_turn("X", &avatar, &[], None).await;
    let has_expertise = avatar
        .expertise
        .iter()
        .take(3)
        .any(|e| reply.reply.contains(e.as_str()));
    assert!(has_expertise, "reply missing expertise: {}", reply.reply);
}

#[tokio::test]
async fn starters_hold_the_three_to_five_contract() {
    let orchestrator = ChatOrchestrator::new(None);
    for id in DomainId::ALL {
        let avatar = wire_avatar(id);
        let starters = orchestrator
            .conversation_starters(&avatar.id, &avatar.domain, &avatar.expertise)
            .await;
        assert!(
            (3..=5).contains(&starters.len()),
            "{} starters for {}",
            starters.len(),
            avatar.id
        );
        assert!(starters.iter().all(|s| !s.is_empty()));
    }
}

#[tokio::test]
async fn empty_expertise_still_produces_a_reply() {
    let orchestrator = ChatOrchestrator::new(None);
    let avatar = ChatAvatar {
        id: "custom".to_string(),
        name: "Nova".to_string(),
        domain: "career".to_string(),
        personality: "direct".to_string(),
        expertise: Vec::new(),
    };
    let reply = orchestrator.send_turn("help", &avatar, &[], None).await;
    assert!(reply.reply.contains("Nova"));
    assert!(!reply.reply.is_empty());
}
