//! # lectern-memory
//!
//! Per-learner retention tracking.
//!
//! - `sm2`: the SM-2 scheduling step (interval, repetitions, easiness).
//! - `strength`: lazy exponential decay, `exp(-elapsedDays / (interval × easiness))`.
//! - `state` / `learner`: one `MemoryState` per concept, grouped in a `LearnerStore`.
//! - `persistence`: one JSON file per learner, written atomically.
//! - `planning`: next-step study recommendations from strength and recent score.
//!
//! Strength is never stored on the live state: every read derives it from the
//! caller-supplied `now`.

pub mod learner;
pub mod persistence;
pub mod planning;
pub mod sm2;
pub mod state;
pub mod strength;

pub use learner::{ConceptSnapshot, LearnerStore, LearningProgress, ReviewCandidate, ReviewOutcome};
pub use persistence::LearnerFileStore;
pub use planning::{recommend, Difficulty, QuestionKind, StudyAction, StudyRecommendation, Urgency};
pub use sm2::QuizScore;
pub use state::{MemoryState, ReviewRecord};
