//! # lectern-core
//!
//! Foundation crate for the lectern session engine.
//! Defines the shared types, the injected capability traits (embedder and
//! triplet extractor), errors, and config. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod spans;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LecternConfig;
pub use errors::{LecternError, LecternResult};
pub use models::{Chunk, GraphHit, HybridResult, RelationEdge, Triplet, VectorHit};
pub use traits::{IEmbedder, ITripletExtractor};
