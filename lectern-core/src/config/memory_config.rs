use serde::{Deserialize, Serialize};

use super::defaults;

/// Spaced-repetition and progress-reporting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Easiness factor assigned to a concept on first review.
    pub initial_easiness: f64,
    /// Floor for the easiness factor.
    pub min_easiness: f64,
    /// Strength below which a concept needs review.
    pub review_threshold: f64,
    /// Maximum concepts returned by a review query.
    pub review_limit: usize,
    /// Strength at or above which a concept counts as mastered.
    pub mastery_threshold: f64,
    /// Strength below which a concept counts as weak.
    pub weak_threshold: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            initial_easiness: defaults::DEFAULT_INITIAL_EASINESS,
            min_easiness: defaults::DEFAULT_MIN_EASINESS,
            review_threshold: defaults::DEFAULT_REVIEW_THRESHOLD,
            review_limit: defaults::DEFAULT_REVIEW_LIMIT,
            mastery_threshold: defaults::DEFAULT_MASTERY_THRESHOLD,
            weak_threshold: defaults::DEFAULT_WEAK_THRESHOLD,
        }
    }
}
