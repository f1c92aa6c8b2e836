use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::sm2::{self, QuizScore, Schedule};
use crate::strength;

/// One graded review, appended in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub time: DateTime<Utc>,
    pub score: u8,
    /// Strength right after the review (always 1.0 at the instant of update).
    pub strength: f64,
    pub interval: u32,
}

/// Spaced-repetition state of one concept for one learner.
///
/// Strength is not a field: call [`MemoryState::strength_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryState {
    pub concept: String,
    pub easiness: f64,
    pub interval_days: u32,
    pub repetitions: u32,
    pub last_review_at: Option<DateTime<Utc>>,
    pub next_review_at: Option<DateTime<Utc>>,
    pub history: Vec<ReviewRecord>,
}

impl MemoryState {
    /// A concept nobody has reviewed yet.
    pub fn new(concept: impl Into<String>, initial_easiness: f64) -> Self {
        Self {
            concept: concept.into(),
            easiness: initial_easiness,
            interval_days: 1,
            repetitions: 0,
            last_review_at: None,
            next_review_at: None,
            history: Vec::new(),
        }
    }

    /// Apply one review at `now` and return the appended history entry.
    pub fn apply(&mut self, score: QuizScore, now: DateTime<Utc>, min_easiness: f64) -> &ReviewRecord {
        let next = sm2::step(
            Schedule {
                interval_days: self.interval_days,
                repetitions: self.repetitions,
                easiness: self.easiness,
            },
            score,
            min_easiness,
        );
        self.interval_days = next.interval_days;
        self.repetitions = next.repetitions;
        self.easiness = next.easiness;
        self.last_review_at = Some(now);
        self.next_review_at = Some(
            now.checked_add_signed(Duration::days(i64::from(next.interval_days)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );

        let strength = self.strength_at(now);
        self.history.push(ReviewRecord {
            time: now,
            score: score.value(),
            strength,
            interval: next.interval_days,
        });
        &self.history[self.history.len() - 1]
    }

    pub fn strength_at(&self, now: DateTime<Utc>) -> f64 {
        strength::calculate(self.last_review_at, self.interval_days, self.easiness, now)
    }

    /// Past due: `now` has reached the scheduled next review.
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at.is_some_and(|next| now >= next)
    }

    pub fn days_since_review_at(&self, now: DateTime<Utc>) -> i64 {
        strength::days_since(self.last_review_at, now)
    }

    /// Score of the most recent review.
    pub fn latest_score(&self) -> Option<u8> {
        self.history.last().map(|r| r.score)
    }

    pub fn total_reviews(&self) -> usize {
        self.history.len()
    }
}
