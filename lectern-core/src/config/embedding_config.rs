use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding configuration for the built-in fallback embedder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Vector dimensions. Fixed for the lifetime of an index.
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}
