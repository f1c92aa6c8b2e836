mod embedding_error;
mod extraction_error;
mod persistence_error;

pub use embedding_error::EmbeddingError;
pub use extraction_error::ExtractionError;
pub use persistence_error::PersistenceError;

/// Convenience alias used across the workspace.
pub type LecternResult<T> = Result<T, LecternError>;

/// Top-level error type for every lectern crate.
#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error("session is not active: cannot {operation}")]
    NotActive { operation: String },

    #[error("session is already active")]
    AlreadyActive,

    #[error("session has ended and cannot be restarted; create a new session")]
    SessionEnded,

    #[error("invalid quiz score {score}: expected 0-5")]
    InvalidScore { score: u8 },

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("extraction error: {0}")]
    ExtractionError(#[from] ExtractionError),

    #[error("persistence error: {0}")]
    PersistenceError(#[from] PersistenceError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

impl LecternError {
    /// Shorthand for the session gate failure.
    pub fn not_active(operation: impl Into<String>) -> Self {
        Self::NotActive {
            operation: operation.into(),
        }
    }
}
