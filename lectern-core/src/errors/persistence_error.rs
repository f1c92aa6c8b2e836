/// Learner-file persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("i/o failure on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("malformed learner file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("invalid learner id {id:?}: must not be empty")]
    InvalidLearnerId { id: String },
}
