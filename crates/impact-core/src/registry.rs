//! Domain & avatar registry.
//!
//! The hub has a fixed set of five social-impact domains, each owning exactly
//! one avatar persona. The catalog is built once at startup and never mutated.
//! Avatars carry their domain as a `DomainId` lookup key rather than a back
//! pointer, so there is no reference cycle to manage.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The five fixed topic areas of the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainId {
    Education,
    Healthcare,
    MentalHealth,
    Career,
    Environment,
}

impl DomainId {
    pub const ALL: [DomainId; 5] = [
        DomainId::Education,
        DomainId::Healthcare,
        DomainId::MentalHealth,
        DomainId::Career,
        DomainId::Environment,
    ];

    /// Catalog key, e.g. `mental-health`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainId::Education => "education",
            DomainId::Healthcare => "healthcare",
            DomainId::MentalHealth => "mental-health",
            DomainId::Career => "career",
            DomainId::Environment => "environment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "education" => Some(DomainId::Education),
            "healthcare" => Some(DomainId::Healthcare),
            "mental-health" => Some(DomainId::MentalHealth),
            "career" => Some(DomainId::Career),
            "environment" => Some(DomainId::Environment),
            _ => None,
        }
    }

    /// Human-readable name, e.g. `Mental Health`.
    pub fn display_name(&self) -> &'static str {
        match self {
            DomainId::Education => "Education",
            DomainId::Healthcare => "Healthcare",
            DomainId::MentalHealth => "Mental Health",
            DomainId::Career => "Career",
            DomainId::Environment => "Environment",
        }
    }

    /// Lower-case spoken form used by voice command matching, e.g. `mental health`.
    pub fn spoken_name(&self) -> &'static str {
        match self {
            DomainId::Education => "education",
            DomainId::Healthcare => "healthcare",
            DomainId::MentalHealth => "mental health",
            DomainId::Career => "career",
            DomainId::Environment => "environment",
        }
    }
}

/// A named AI persona bound to one domain. Immutable after catalog creation.
#[derive(Debug, Clone, Serialize)]
pub struct Avatar {
    pub id: &'static str,
    pub name: &'static str,
    /// Weak back-reference: resolve with [`domain`].
    pub domain: DomainId,
    pub personality: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub position: [f32; 3],
    pub expertise: &'static [&'static str],
    pub greeting: &'static str,
}

/// One of the five fixed topic areas, owning its avatar.
#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    pub id: DomainId,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub position: [f32; 3],
    pub avatar: Avatar,
}

static DOMAINS: Lazy<Vec<Domain>> = Lazy::new(|| {
    vec![
        Domain {
            id: DomainId::Education,
            name: "Education",
            description: "Learn new skills and expand your knowledge",
            color: "#3B82F6",
            icon: "🎓",
            position: [-8.0, 0.0, -8.0],
            avatar: Avatar {
                id: "edu-avatar",
                name: "Sophia",
                domain: DomainId::Education,
                personality: "encouraging, patient, knowledgeable",
                description: "An enthusiastic educator who helps you learn and grow",
                color: "#3B82F6",
                position: [-8.0, 1.0, -8.0],
                expertise: &[
                    "Learning strategies",
                    "Skill development",
                    "Educational resources",
                    "Career guidance",
                ],
                greeting: "Hello! I'm Sophia, your learning companion. What would you like to explore today?",
            },
        },
        Domain {
            id: DomainId::Healthcare,
            name: "Healthcare",
            description: "Health information and wellness guidance",
            color: "#EF4444",
            icon: "🏥",
            position: [8.0, 0.0, -8.0],
            avatar: Avatar {
                id: "health-avatar",
                name: "Dr. Marcus",
                domain: DomainId::Healthcare,
                personality: "caring, professional, reassuring",
                description: "A compassionate healthcare guide focused on your wellbeing",
                color: "#EF4444",
                position: [8.0, 1.0, -8.0],
                expertise: &[
                    "Health information",
                    "Wellness tips",
                    "Medical resources",
                    "Preventive care",
                ],
                greeting: "Hi there! I'm Dr. Marcus. I'm here to help with health information and wellness guidance.",
            },
        },
        Domain {
            id: DomainId::MentalHealth,
            name: "Mental Health",
            description: "Emotional support and mental wellness",
            color: "#8B5CF6",
            icon: "🧠",
            position: [-8.0, 0.0, 8.0],
            avatar: Avatar {
                id: "mental-avatar",
                name: "Luna",
                domain: DomainId::MentalHealth,
                personality: "empathetic, supportive, understanding",
                description: "A gentle supporter for mental health and emotional wellbeing",
                color: "#8B5CF6",
                position: [-8.0, 1.0, 8.0],
                expertise: &[
                    "Emotional support",
                    "Stress management",
                    "Mindfulness",
                    "Coping strategies",
                ],
                greeting: "Hello, I'm Luna. I'm here to listen and support your mental health journey.",
            },
        },
        Domain {
            id: DomainId::Career,
            name: "Career",
            description: "Professional development and career guidance",
            color: "#10B981",
            icon: "💼",
            position: [8.0, 0.0, 8.0],
            avatar: Avatar {
                id: "career-avatar",
                name: "Alex",
                domain: DomainId::Career,
                personality: "motivating, strategic, ambitious",
                description: "A career coach focused on professional growth and opportunities",
                color: "#10B981",
                position: [8.0, 1.0, 8.0],
                expertise: &[
                    "Career planning",
                    "Job search",
                    "Skills development",
                    "Networking",
                ],
                greeting: "Welcome! I'm Alex, your career development partner. Let's build your future together!",
            },
        },
        Domain {
            id: DomainId::Environment,
            name: "Environment",
            description: "Sustainability and environmental awareness",
            color: "#059669",
            icon: "🌱",
            position: [0.0, 0.0, 12.0],
            avatar: Avatar {
                id: "env-avatar",
                name: "Terra",
                domain: DomainId::Environment,
                personality: "passionate, informed, eco-conscious",
                description: "An environmental advocate focused on sustainability and planet care",
                color: "#059669",
                position: [0.0, 1.0, 12.0],
                expertise: &[
                    "Sustainability",
                    "Climate action",
                    "Green living",
                    "Environmental science",
                ],
                greeting: "Greetings! I'm Terra, your environmental guide. Let's explore how to care for our planet!",
            },
        },
    ]
});

/// All five domains in catalog order.
pub fn domains() -> &'static [Domain] {
    &DOMAINS
}

/// Resolve a `DomainId` to its catalog entry. Total over the enum.
pub fn domain(id: DomainId) -> &'static Domain {
    DOMAINS
        .iter()
        .find(|d| d.id == id)
        .expect("catalog covers every DomainId")
}

pub fn find_domain(id: &str) -> Option<&'static Domain> {
    DomainId::from_str(id).map(domain)
}

pub fn find_domain_by_avatar_id(avatar_id: &str) -> Option<&'static Domain> {
    DOMAINS.iter().find(|d| d.avatar.id == avatar_id)
}

pub fn avatar_for(id: DomainId) -> &'static Avatar {
    &domain(id).avatar
}

/// Three canned prompts per domain for the quick-action panel.
pub fn quick_prompts(id: DomainId) -> &'static [&'static str] {
    match id {
        DomainId::Education => &[
            "What's the most effective way to learn a new skill?",
            "How can I stay motivated while studying?",
            "What are the best online learning resources?",
        ],
        DomainId::Healthcare => &[
            "What are some daily habits for better health?",
            "How can I improve my sleep quality?",
            "What's important for mental wellness?",
        ],
        DomainId::MentalHealth => &[
            "How can I manage stress better?",
            "What are some mindfulness techniques?",
            "How do I build emotional resilience?",
        ],
        DomainId::Career => &[
            "How do I advance in my career?",
            "What skills are most valuable today?",
            "How can I improve my networking?",
        ],
        DomainId::Environment => &[
            "How can I reduce my carbon footprint?",
            "What are simple ways to live sustainably?",
            "How can communities fight climate change?",
        ],
    }
}
