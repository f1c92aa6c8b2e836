//! Built-in embedders.

pub mod tfidf_fallback;

pub use tfidf_fallback::TfIdfEmbedder;
