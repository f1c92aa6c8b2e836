//! Graph storage: string→index interning over a `StableGraph`.

pub mod indexed;

pub use indexed::{ConceptNode, ConceptStableGraph, IndexedGraph};
