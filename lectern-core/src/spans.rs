//! Span constructors for the traced operations: retrieval, graph build,
//! session start and session end.
//!
//! The macros expand to `tracing::info_span!` in the calling crate, so callers
//! depend on `tracing` directly.

/// Create a hybrid-retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($top_k:expr) => {
        tracing::info_span!($crate::spans::names::RETRIEVAL, top_k = $top_k)
    };
}

/// Create a concept-graph build span.
#[macro_export]
macro_rules! graph_build_span {
    ($chunk_count:expr) => {
        tracing::info_span!($crate::spans::names::GRAPH_BUILD, chunks = $chunk_count)
    };
}

/// Create a session-start span.
#[macro_export]
macro_rules! session_start_span {
    ($session_id:expr) => {
        tracing::info_span!($crate::spans::names::SESSION_START, session_id = %$session_id)
    };
}

/// Create a session-end span.
#[macro_export]
macro_rules! session_end_span {
    ($session_id:expr) => {
        tracing::info_span!($crate::spans::names::SESSION_END, session_id = %$session_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "lectern.retrieval";
    pub const GRAPH_BUILD: &str = "lectern.graph.build";
    pub const SESSION_START: &str = "lectern.session.start";
    pub const SESSION_END: &str = "lectern.session.end";
}
