use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api" or "lexical".
    pub provider: String,
    /// Append the lexical provider as a last-resort fallback. Off by default:
    /// vectors from different providers are not comparable.
    pub fallback_to_lexical: bool,
    /// Model identifier sent to the API provider.
    pub model: String,
    /// Override for the API endpoint URL.
    pub endpoint: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Embedding dimensions. Every vector is validated against this.
    pub dimensions: usize,
    /// Max texts per provider call.
    pub batch_size: usize,
    /// In-memory cache max entries.
    pub cache_size: u64,
    /// Retries per API request before the provider marks itself unavailable.
    pub max_retries: u32,
    /// Per-request timeout for the API provider.
    pub request_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            fallback_to_lexical: defaults::DEFAULT_FALLBACK_TO_LEXICAL,
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: None,
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
