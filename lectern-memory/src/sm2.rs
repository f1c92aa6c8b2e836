//! SM-2 scheduling step.
//!
//! ```text
//! success (q ≥ 3): reps 0 → interval 1, reps 1 → interval 6,
//!                  otherwise interval = round(interval × EF); reps += 1
//! failure (q < 3): reps = 0, interval = 1
//! always:          EF' = max(minEF, EF + (0.1 − (5 − q)(0.08 + (5 − q)0.02)))
//! ```
//!
//! The interval step uses the easiness factor from *before* the update.

use std::fmt;

use lectern_core::errors::{LecternError, LecternResult};
use serde::{Deserialize, Serialize};

/// A quiz score on the 0–5 SM-2 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuizScore(u8);

impl QuizScore {
    pub const MAX: u8 = 5;
    /// Lowest score counted as a successful recall.
    pub const PASSING: u8 = 3;

    /// Validate a raw score. Anything above 5 is rejected.
    pub fn new(score: u8) -> LecternResult<Self> {
        if score > Self::MAX {
            return Err(LecternError::InvalidScore { score });
        }
        Ok(Self(score))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<u8> for QuizScore {
    type Error = LecternError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuizScore> for u8 {
    fn from(score: QuizScore) -> Self {
        score.0
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scheduling parameters after one review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub interval_days: u32,
    pub repetitions: u32,
    pub easiness: f64,
}

/// Apply one review with `score` to the prior schedule.
pub fn step(prior: Schedule, score: QuizScore, min_easiness: f64) -> Schedule {
    let (interval_days, repetitions) = if score.is_success() {
        let interval = match prior.repetitions {
            0 => 1,
            1 => 6,
            _ => scaled_interval(prior.interval_days, prior.easiness),
        };
        (interval, prior.repetitions.saturating_add(1))
    } else {
        (1, 0)
    };

    Schedule {
        interval_days,
        repetitions,
        easiness: next_easiness(prior.easiness, score, min_easiness),
    }
}

/// `max(min, EF + (0.1 − (5 − q)(0.08 + (5 − q)0.02)))`
pub fn next_easiness(easiness: f64, score: QuizScore, min_easiness: f64) -> f64 {
    let miss = f64::from(QuizScore::MAX - score.value());
    (easiness + (0.1 - miss * (0.08 + miss * 0.02))).max(min_easiness)
}

fn scaled_interval(interval: u32, easiness: f64) -> u32 {
    let scaled = (f64::from(interval) * easiness).round();
    // Intervals stay ≥ 1 and saturate instead of wrapping.
    if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (scaled as u32).max(1)
    }
}
