/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider returned {actual} vectors for {expected} texts")]
    CountMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    /// The provider refused this input. Retrying or falling back will not help.
    #[error("input rejected ({status}): {reason}")]
    InputRejected { status: u16, reason: String },
}
