//! LearnerStore: every concept's memory state for one learner.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use lectern_core::config::MemoryConfig;
use lectern_core::errors::LecternResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sm2::QuizScore;
use crate::state::MemoryState;

/// Result of recording one quiz score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub concept: String,
    pub new_strength: f64,
    pub next_review_at: DateTime<Utc>,
    pub interval_days: u32,
    pub total_reviews: usize,
}

/// A concept selected for review, highest priority first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCandidate {
    pub concept: String,
    pub strength: f64,
    /// `1 − strength`.
    pub priority: f64,
    pub next_review_at: Option<DateTime<Utc>>,
    /// Whole days, 999 if never reviewed.
    pub days_since_review: i64,
}

/// Learner-wide retention summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub total_concepts: usize,
    pub average_strength: f64,
    pub mastered_count: usize,
    pub mastered_percentage: f64,
    pub weak_count: usize,
    pub weak_percentage: f64,
    /// Concepts whose next review time has passed.
    pub needs_review: usize,
}

/// Per-concept export for visualisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSnapshot {
    pub concept: String,
    pub strength: f64,
    pub interval: u32,
    pub next_review_at: Option<DateTime<Utc>>,
    pub repetitions: u32,
    pub easiness: f64,
}

/// All memory states of one learner, keyed by concept name.
///
/// Concept states are created lazily on the first recorded result. Every
/// query takes `now` so strength is derived at read time.
#[derive(Debug, Clone)]
pub struct LearnerStore {
    learner_id: String,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
    concepts: BTreeMap<String, MemoryState>,
    config: MemoryConfig,
}

impl LearnerStore {
    /// A blank store for a learner seen for the first time at `now`.
    pub fn new(learner_id: impl Into<String>, config: MemoryConfig, now: DateTime<Utc>) -> Self {
        Self {
            learner_id: learner_id.into(),
            created_at: now,
            last_activity_at: now,
            concepts: BTreeMap::new(),
            config,
        }
    }

    /// Reassemble a store from persisted parts.
    pub fn from_parts(
        learner_id: impl Into<String>,
        created_at: DateTime<Utc>,
        last_activity_at: DateTime<Utc>,
        concepts: impl IntoIterator<Item = MemoryState>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            learner_id: learner_id.into(),
            created_at,
            last_activity_at,
            concepts: concepts
                .into_iter()
                .map(|s| (s.concept.clone(), s))
                .collect(),
            config,
        }
    }

    /// Record a quiz score for `concept` at the current time.
    pub fn record_result(&mut self, concept: &str, score: u8) -> LecternResult<ReviewOutcome> {
        self.record_result_at(concept, score, Utc::now())
    }

    /// Record a quiz score for `concept` at `now`.
    ///
    /// The score is validated before anything changes.
    pub fn record_result_at(
        &mut self,
        concept: &str,
        score: u8,
        now: DateTime<Utc>,
    ) -> LecternResult<ReviewOutcome> {
        let score = QuizScore::new(score)?;
        let initial_easiness = self.config.initial_easiness;
        let state = self
            .concepts
            .entry(concept.to_string())
            .or_insert_with(|| MemoryState::new(concept, initial_easiness));

        let record = state.apply(score, now, self.config.min_easiness);
        let new_strength = record.strength;
        let interval_days = state.interval_days;
        let next_review_at = state.next_review_at.unwrap_or(now);
        let total_reviews = state.total_reviews();
        self.last_activity_at = now;

        debug!(
            learner_id = %self.learner_id,
            concept,
            score = score.value(),
            interval_days,
            "quiz result recorded"
        );

        Ok(ReviewOutcome {
            concept: concept.to_string(),
            new_strength,
            next_review_at,
            interval_days,
            total_reviews,
        })
    }

    /// Concepts with strength below `threshold` or past due, weakest first.
    ///
    /// Ties on strength go to the concept reviewed longest ago.
    pub fn concepts_needing_review_at(
        &self,
        threshold: f64,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<ReviewCandidate> {
        let mut candidates: Vec<ReviewCandidate> = self
            .concepts
            .values()
            .filter_map(|state| {
                let strength = state.strength_at(now);
                if strength < threshold || state.is_due_at(now) {
                    Some(ReviewCandidate {
                        concept: state.concept.clone(),
                        strength,
                        priority: 1.0 - strength,
                        next_review_at: state.next_review_at,
                        days_since_review: state.days_since_review_at(now),
                    })
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.days_since_review.cmp(&a.days_since_review))
        });
        candidates.truncate(limit);
        candidates
    }

    /// Review selection with the configured threshold and limit.
    pub fn review_queue_at(&self, now: DateTime<Utc>) -> Vec<ReviewCandidate> {
        self.concepts_needing_review_at(self.config.review_threshold, self.config.review_limit, now)
    }

    /// Concepts at or above `threshold`, in name order.
    pub fn mastered_concepts_at(&self, threshold: f64, now: DateTime<Utc>) -> Vec<String> {
        self.concepts
            .values()
            .filter(|s| s.strength_at(now) >= threshold)
            .map(|s| s.concept.clone())
            .collect()
    }

    pub fn aggregate_progress_at(&self, now: DateTime<Utc>) -> LearningProgress {
        let total = self.concepts.len();
        if total == 0 {
            return LearningProgress::default();
        }

        let mut sum = 0.0;
        let mut mastered = 0;
        let mut weak = 0;
        let mut due = 0;
        for state in self.concepts.values() {
            let strength = state.strength_at(now);
            sum += strength;
            if strength >= self.config.mastery_threshold {
                mastered += 1;
            } else if strength < self.config.weak_threshold {
                weak += 1;
            }
            if state.is_due_at(now) {
                due += 1;
            }
        }

        let n = total as f64;
        LearningProgress {
            total_concepts: total,
            average_strength: sum / n,
            mastered_count: mastered,
            mastered_percentage: mastered as f64 / n * 100.0,
            weak_count: weak,
            weak_percentage: weak as f64 / n * 100.0,
            needs_review: due,
        }
    }

    /// Every concept's current parameters, in name order.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Vec<ConceptSnapshot> {
        self.concepts
            .values()
            .map(|s| ConceptSnapshot {
                concept: s.concept.clone(),
                strength: s.strength_at(now),
                interval: s.interval_days,
                next_review_at: s.next_review_at,
                repetitions: s.repetitions,
                easiness: s.easiness,
            })
            .collect()
    }

    /// Current strength of `concept`; 0.0 for a concept never recorded.
    pub fn strength_of(&self, concept: &str, now: DateTime<Utc>) -> f64 {
        self.concepts
            .get(concept)
            .map_or(0.0, |s| s.strength_at(now))
    }

    pub fn concept(&self, concept: &str) -> Option<&MemoryState> {
        self.concepts.get(concept)
    }

    /// Memory states in concept-name order.
    pub fn concepts(&self) -> impl Iterator<Item = &MemoryState> {
        self.concepts.values()
    }

    pub fn learner_id(&self) -> &str {
        &self.learner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity_at(&self) -> DateTime<Utc> {
        self.last_activity_at
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
