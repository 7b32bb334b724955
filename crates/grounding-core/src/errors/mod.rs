mod embedding_error;
mod grounding_error;

pub use embedding_error::EmbeddingError;
pub use grounding_error::{CoreResult, GroundingError};
