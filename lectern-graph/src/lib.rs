//! # lectern-graph
//!
//! The concept graph. An interned `petgraph` `StableGraph` of entities joined by
//! directed, labelled relations extracted from course text. Answers bounded-hop
//! reachability queries for multi-hop retrieval.

pub mod engine;
pub mod extraction;
pub mod graph;
pub mod traversal;

pub use engine::{BuildReport, ConceptGraph};
pub use extraction::{parse_triplet_response, PromptedExtractor};
pub use graph::IndexedGraph;
