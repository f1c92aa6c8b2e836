//! # lectern-session
//!
//! One class session: a `HybridRetriever` built at `start`, learner stores
//! resident while the session runs, all persisted and released at `end`.
//!
//! ```text
//! Inactive ──start──▶ Active ──end──▶ Ending ──persisted──▶ Ended
//!                       ▲                │
//!                       └──save failed───┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod corpus;
pub mod stats;
pub mod tracing_setup;

pub use aggregate::{ClassAggregate, ConceptAggregate};
pub use cache::{QueryResponse, SessionCache, SessionInfo, SessionOptions};
pub use corpus::CorpusSource;
pub use stats::{SessionStats, SessionSummary, StatsSnapshot};
