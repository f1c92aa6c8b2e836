use serde::{Deserialize, Serialize};

/// `(head entity, relation label, tail entity)` as produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triplet {
    pub head: String,
    pub relation: String,
    pub tail: String,
}

impl Triplet {
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }
}

/// Attributes stored on a directed `(head, tail)` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    /// Relation label, e.g. "uses".
    pub label: String,
    /// Provenance of the chunk the triple was extracted from.
    pub source_ref: String,
}
