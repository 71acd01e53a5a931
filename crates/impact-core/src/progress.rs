//! Engagement progress ledger.
//!
//! Pure local state: interaction counts, the explored-domain set, unlocked
//! achievements, and the derived impact score. The score is always the fixed
//! linear function of the other fields; every mutation recomputes it so a
//! serialized ledger can never carry a stale score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::registry::DomainId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    FirstChat,
    DomainExplorer,
    SocialImpact,
    Engagement,
    Progress,
}

/// Unlocked once, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
    pub category: AchievementCategory,
}

impl Achievement {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        category: AchievementCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked_at: Utc::now(),
            category,
        }
    }

    /// First conversation with any avatar.
    pub fn first_chat() -> Self {
        Self::new(
            "first-chat",
            "First Steps",
            "Started your first conversation",
            "💬",
            AchievementCategory::FirstChat,
        )
    }

    /// First saved conversation transcript.
    pub fn first_save() -> Self {
        Self::new(
            "first-save",
            "Keeper of Wisdom",
            "Saved your first conversation",
            "💾",
            AchievementCategory::Engagement,
        )
    }

    /// All five domains visited.
    pub fn domain_explorer() -> Self {
        Self::new(
            "domain-explorer",
            "Domain Explorer",
            "Explored all five impact domains",
            "🧭",
            AchievementCategory::DomainExplorer,
        )
    }
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

/// Monotonically-informed summary of user engagement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressLedger {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub total_interactions: u64,
    pub domains_explored: BTreeSet<DomainId>,
    pub achievements: Vec<Achievement>,
    pub impact_score: u64,
    pub sessions_completed: u64,
}

impl Default for ProgressLedger {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            total_interactions: 0,
            domains_explored: BTreeSet::new(),
            achievements: Vec::new(),
            impact_score: 0,
            sessions_completed: 0,
        }
    }
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_interaction(&mut self) {
        self.total_interactions += 1;
        self.recompute_score();
    }

    /// Idempotent; returns true when the domain was newly explored.
    pub fn record_domain_explored(&mut self, domain: DomainId) -> bool {
        let added = self.domains_explored.insert(domain);
        self.recompute_score();
        added
    }

    /// Idempotent by id; an achievement is never unlocked twice or removed.
    /// Returns true when the achievement was newly added.
    pub fn unlock_achievement(&mut self, achievement: Achievement) -> bool {
        if self.achievements.iter().any(|a| a.id == achievement.id) {
            return false;
        }
        self.achievements.push(achievement);
        self.recompute_score();
        true
    }

    pub fn complete_session(&mut self) {
        self.sessions_completed += 1;
        self.recompute_score();
    }

    pub fn all_domains_explored(&self) -> bool {
        self.domains_explored.len() == DomainId::ALL.len()
    }

    /// score = 2·interactions + 10·|domains| + 25·|achievements| + 5·sessions
    pub fn recompute_score(&mut self) {
        self.impact_score = self.total_interactions * 2
            + self.domains_explored.len() as u64 * 10
            + self.achievements.len() as u64 * 25
            + self.sessions_completed * 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_formula_is_the_fixed_linear_combination() {
        let mut ledger = ProgressLedger::new();
        for _ in 0..3 {
            ledger.record_interaction();
        }
        ledger.record_domain_explored(DomainId::Education);
        ledger.record_domain_explored(DomainId::Career);
        ledger.unlock_achievement(Achievement::first_chat());
        ledger.complete_session();
        // 2*3 + 10*2 + 25*1 + 5*1
        assert_eq!(ledger.impact_score, 56);
    }

    #[test]
    fn domain_exploration_is_idempotent() {
        let mut ledger = ProgressLedger::new();
        assert!(ledger.record_domain_explored(DomainId::Environment));
        assert!(!ledger.record_domain_explored(DomainId::Environment));
        assert_eq!(ledger.domains_explored.len(), 1);
        assert_eq!(ledger.impact_score, 10);
    }

    #[test]
    fn achievements_are_idempotent_by_id() {
        let mut ledger = ProgressLedger::new();
        assert!(ledger.unlock_achievement(Achievement::first_save()));
        assert!(!ledger.unlock_achievement(Achievement::first_save()));
        assert_eq!(ledger.achievements.len(), 1);
        assert_eq!(ledger.impact_score, 25);
    }

    #[test]
    fn every_mutation_recomputes_the_score() {
        let mut ledger = ProgressLedger::new();
        ledger.record_domain_explored(DomainId::Healthcare);
        assert_eq!(ledger.impact_score, 10);
        ledger.unlock_achievement(Achievement::domain_explorer());
        assert_eq!(ledger.impact_score, 35);
        ledger.complete_session();
        assert_eq!(ledger.impact_score, 40);
    }

    #[test]
    fn all_domains_explored_checks_the_full_set() {
        let mut ledger = ProgressLedger::new();
        for id in DomainId::ALL {
            assert!(!ledger.all_domains_explored());
            ledger.record_domain_explored(id);
        }
        assert!(ledger.all_domains_explored());
    }

    #[test]
    fn ledger_round_trips_through_serde() {
        let mut ledger = ProgressLedger::new();
        ledger.record_interaction();
        ledger.record_domain_explored(DomainId::MentalHealth);
        let json = serde_json::to_string(&ledger).unwrap();
        let back: ProgressLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_interactions, 1);
        assert!(back.domains_explored.contains(&DomainId::MentalHealth));
        assert_eq!(back.impact_score, ledger.impact_score);
    }
}
