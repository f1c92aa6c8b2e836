//! # lectern-retrieval
//!
//! Hybrid retrieval over ingested course text.
//!
//! ## Architecture
//!
//! ```text
//! HybridRetriever
//! ├── VectorIndex (exact squared-L2 nearest neighbours)
//! ├── ConceptGraph (lectern-graph, bounded-hop traversal)
//! └── entity bridge (graph labels found verbatim in the query or top hit)
//! ```
//!
//! `TfIdfEmbedder` is an always-available embedder for deployments without a
//! neural model; `chunking` splits raw text into overlapping windows.

pub mod chunking;
pub mod engine;
pub mod index;
pub mod providers;
pub mod search;

pub use chunking::{chunk_document, chunk_text};
pub use engine::{HybridRetriever, RetrieverStats};
pub use index::VectorIndex;
pub use providers::TfIdfEmbedder;
