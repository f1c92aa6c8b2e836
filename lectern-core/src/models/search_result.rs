use serde::{Deserialize, Serialize};

/// One nearest-neighbour hit from the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorHit {
    pub text: String,
    pub source_ref: String,
    /// Squared L2 distance to the query embedding (lower = closer).
    pub score: f32,
}

/// One entity reached by bounded-hop traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphHit {
    /// The reached entity.
    pub entity: String,
    /// Entities along the shortest path, start and target included.
    pub path: Vec<String>,
    /// Relation labels along the path; `relations.len() == hops`.
    pub relations: Vec<String>,
    pub hops: usize,
}

/// Result of one hybrid query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridResult {
    pub vector_results: Vec<VectorHit>,
    pub graph_results: Vec<GraphHit>,
    pub query: String,
}

impl HybridResult {
    /// An empty result for `query`.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            vector_results: Vec::new(),
            graph_results: Vec::new(),
            query: query.into(),
        }
    }
}
