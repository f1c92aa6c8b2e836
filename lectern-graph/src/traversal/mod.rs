//! Bounded-hop traversal over the concept graph.

pub mod within_hops;

/// Configuration for traversal operations.
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    /// Maximum number of directed edges on any returned path.
    pub max_hops: usize,
    /// Maximum hits to return.
    pub max_results: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_hops: lectern_core::config::defaults::DEFAULT_GRAPH_MAX_HOPS,
            max_results: lectern_core::config::defaults::DEFAULT_GRAPH_RESULT_LIMIT,
        }
    }
}
