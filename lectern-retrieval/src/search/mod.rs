//! Query-time helpers bridging vector hits to the concept graph.

pub mod entity_bridge;

pub use entity_bridge::candidate_entities;
