//! petgraph::StableGraph wrapper with interned entity labels.

use std::collections::HashMap;

use lectern_core::models::RelationEdge;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::Directed;
use serde::{Deserialize, Serialize};

/// A node in the concept graph, representing one entity label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptNode {
    pub label: String,
}

/// The underlying directed graph type.
pub type ConceptStableGraph = StableGraph<ConceptNode, RelationEdge, Directed>;

/// Wrapper providing interned access to the concept graph.
///
/// Node indices are handed out in insertion order and nodes are never removed,
/// so iterating `graph.node_indices()` visits entities in the order they were
/// first seen. At most one edge exists per ordered `(head, tail)` pair.
pub struct IndexedGraph {
    /// The petgraph stable graph.
    pub graph: ConceptStableGraph,
    /// Map from entity label → NodeIndex for O(1) lookup.
    pub node_index: HashMap<String, NodeIndex>,
}

impl IndexedGraph {
    /// Create an empty indexed graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Get or create the node for `label`.
    pub fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(ConceptNode {
            label: label.to_string(),
        });
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    /// Look up a node index by label.
    pub fn get_node(&self, label: &str) -> Option<NodeIndex> {
        self.node_index.get(label).copied()
    }

    /// Label of a node.
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.label.as_str())
    }

    /// Insert or overwrite the edge `head → tail`. Last write wins.
    pub fn upsert_edge(&mut self, head: &str, tail: &str, edge: RelationEdge) -> EdgeIndex {
        let h = self.ensure_node(head);
        let t = self.ensure_node(tail);
        self.graph.update_edge(h, t, edge)
    }

    /// Attributes of the edge `head → tail`, if present.
    pub fn edge(&self, head: NodeIndex, tail: NodeIndex) -> Option<&RelationEdge> {
        self.graph
            .find_edge(head, tail)
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}
