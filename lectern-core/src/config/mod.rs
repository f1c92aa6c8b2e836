pub mod defaults;
mod embedding_config;
mod memory_config;
mod observability_config;
mod retrieval_config;
mod session_config;

pub use embedding_config::EmbeddingConfig;
pub use memory_config::MemoryConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use session_config::SessionConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{LecternError, LecternResult};

/// Top-level configuration. Every section is optional in TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LecternConfig {
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub memory: MemoryConfig,
    pub session: SessionConfig,
    pub observability: ObservabilityConfig,
}

impl LecternConfig {
    /// Parse a TOML document, filling missing fields with defaults.
    pub fn from_toml(toml_str: &str) -> LecternResult<Self> {
        toml::from_str(toml_str).map_err(|e| LecternError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &std::path::Path) -> LecternResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LecternError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }
}
