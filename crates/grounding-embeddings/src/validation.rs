//! Shape checks applied to every vector a provider returns.

use grounding_core::errors::{CoreResult, EmbeddingError};

/// Validate that an embedding has the expected dimensions.
///
/// # Errors
/// Returns `DimensionMismatch` if dimensions don't match.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> CoreResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}

/// Validate a provider batch: one vector per input text, each of `dims` length.
///
/// # Errors
/// Returns `CountMismatch` or `DimensionMismatch`.
pub fn validate_batch(embeddings: &[Vec<f32>], texts: usize, dims: usize) -> CoreResult<()> {
    if embeddings.len() != texts {
        return Err(EmbeddingError::CountMismatch {
            expected: texts,
            actual: embeddings.len(),
        }
        .into());
    }
    embeddings
        .iter()
        .try_for_each(|e| validate_dimensions(e, dims))
}
