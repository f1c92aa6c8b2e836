//! Lexical bridge from embedding space to graph entities.

use lectern_core::models::VectorHit;
use lectern_graph::ConceptGraph;

/// Graph entities mentioned verbatim in `query` or in the closest vector hit.
///
/// Matching is a case-sensitive substring test, in graph insertion order.
/// Without at least one vector hit there are no candidates, even when the
/// query itself names an entity.
pub fn candidate_entities<'g>(
    graph: &'g ConceptGraph,
    query: &str,
    vector_hits: &[VectorHit],
) -> Vec<&'g str> {
    let Some(top) = vector_hits.first() else {
        return Vec::new();
    };
    graph
        .entities()
        .filter(|e| !e.is_empty())
        .filter(|e| query.contains(e) || top.text.contains(e))
        .collect()
}
