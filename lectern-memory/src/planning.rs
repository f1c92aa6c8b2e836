//! Next-step study recommendations.
//!
//! | strength  | action    | urgency | question kind  | difficulty |
//! |-----------|-----------|---------|----------------|------------|
//! | < 0.3     | review    | high    | recall         | easy       |
//! | < 0.5     | practice  | medium  | application    | medium     |
//! | < 0.6     | reinforce | low     | application    | medium     |
//! | < 0.7     | reinforce | low     | relational     | medium     |
//! | < 0.8     | advance   | none    | relational     | hard       |
//! | otherwise | advance   | none    | error-analysis | hard       |
//!
//! A most recent score of 2 or lower turns any non-review action into a
//! review at medium urgency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::learner::LearnerStore;

/// Related concepts carried in a recommendation.
pub const MAX_RELATED_CONCEPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyAction {
    Review,
    Practice,
    Reinforce,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Recall,
    Application,
    Relational,
    ErrorAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecommendation {
    pub concept: String,
    pub strength: f64,
    pub recent_score: Option<u8>,
    pub action: StudyAction,
    pub urgency: Urgency,
    pub question_kind: QuestionKind,
    pub difficulty: Difficulty,
    pub related_concepts: Vec<String>,
}

impl StudyAction {
    /// Action and urgency from strength and the latest score.
    pub fn select(strength: f64, recent_score: Option<u8>) -> (Self, Urgency) {
        let (action, urgency) = if strength < 0.3 {
            (Self::Review, Urgency::High)
        } else if strength < 0.5 {
            (Self::Practice, Urgency::Medium)
        } else if strength < 0.7 {
            (Self::Reinforce, Urgency::Low)
        } else {
            (Self::Advance, Urgency::None)
        };

        match recent_score {
            Some(score) if score <= 2 && action != Self::Review => (Self::Review, Urgency::Medium),
            _ => (action, urgency),
        }
    }
}

impl QuestionKind {
    pub fn for_strength(strength: f64) -> Self {
        if strength < 0.3 {
            Self::Recall
        } else if strength < 0.6 {
            Self::Application
        } else if strength < 0.8 {
            Self::Relational
        } else {
            Self::ErrorAnalysis
        }
    }
}

impl Difficulty {
    pub fn for_strength(strength: f64) -> Self {
        if strength < 0.3 {
            Self::Easy
        } else if strength < 0.7 {
            Self::Medium
        } else {
            Self::Hard
        }
    }
}

/// Recommend what `concept` needs next for this learner at `now`.
///
/// `related` is typically the graph neighbourhood of the concept; only the
/// first few distinct entries other than the concept itself are kept.
pub fn recommend(
    store: &LearnerStore,
    concept: &str,
    related: impl IntoIterator<Item = String>,
    now: DateTime<Utc>,
) -> StudyRecommendation {
    let strength = store.strength_of(concept, now);
    let recent_score = store.concept(concept).and_then(|s| s.latest_score());
    let (action, urgency) = StudyAction::select(strength, recent_score);

    let mut related_concepts: Vec<String> = Vec::with_capacity(MAX_RELATED_CONCEPTS);
    for r in related {
        if related_concepts.len() == MAX_RELATED_CONCEPTS {
            break;
        }
        if r != concept && !related_concepts.contains(&r) {
            related_concepts.push(r);
        }
    }

    StudyRecommendation {
        concept: concept.to_string(),
        strength,
        recent_score,
        action,
        urgency,
        question_kind: QuestionKind::for_strength(strength),
        difficulty: Difficulty::for_strength(strength),
        related_concepts,
    }
}
