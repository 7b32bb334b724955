use super::EmbeddingError;

/// Top-level error type for the grounding engine.
/// Subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum GroundingError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("embedding dimension mismatch: corpus has {expected}, claim has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("corpus invariant violated: {reason}")]
    CorpusInvariant { reason: String },

    #[error("transcript not found: {handle}")]
    TranscriptNotFound { handle: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GroundingError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias.
pub type CoreResult<T> = Result<T, GroundingError>;
