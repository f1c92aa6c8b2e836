use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Vector results per session query.
    pub top_k: usize,
    /// Hop bound for graph expansion of candidate entities.
    pub graph_max_hops: usize,
    /// Candidate entities expanded per query.
    pub max_graph_entities: usize,
    /// Cap on graph results, both per traversal and after merging.
    pub graph_result_limit: usize,
    /// Fraction of chunks sent through triplet extraction (0.0–1.0).
    pub graph_sample_rate: f64,
    /// Characters per chunk when splitting raw text.
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            graph_max_hops: defaults::DEFAULT_GRAPH_MAX_HOPS,
            max_graph_entities: defaults::DEFAULT_MAX_GRAPH_ENTITIES,
            graph_result_limit: defaults::DEFAULT_GRAPH_RESULT_LIMIT,
            graph_sample_rate: defaults::DEFAULT_GRAPH_SAMPLE_RATE,
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            chunk_overlap: defaults::DEFAULT_CHUNK_OVERLAP,
        }
    }
}
