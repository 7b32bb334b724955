//! Provider registry.

pub mod api_provider;
pub mod lexical_hash;

pub use api_provider::ApiProvider;
pub use lexical_hash::LexicalHashProvider;

use grounding_core::config::EmbeddingConfig;
use grounding_core::errors::{CoreResult, GroundingError};
use grounding_core::traits::IEmbeddingProvider;
use tracing::info;

/// Create the configured primary provider.
///
/// # Errors
/// `ConfigError` for an unknown provider name.
pub fn create_provider(config: &EmbeddingConfig) -> CoreResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "api" => {
            let provider = ApiProvider::from_config(config)?;
            info!(provider = "api", model = %config.model, "embedding provider configured");
            Ok(Box::new(provider))
        }
        "lexical" => {
            info!(provider = "lexical", "using lexical hashing provider");
            Ok(Box::new(LexicalHashProvider::new(config.dimensions)))
        }
        other => Err(GroundingError::ConfigError(format!(
            "unknown embedding provider: {other}"
        ))),
    }
}
