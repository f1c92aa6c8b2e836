//! In-memory vector index.

pub mod vector_index;

pub use vector_index::VectorIndex;
