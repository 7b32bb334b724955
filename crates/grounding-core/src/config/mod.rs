pub mod citation_config;
pub mod defaults;
pub mod embedding_config;

use serde::{Deserialize, Serialize};

pub use citation_config::{CitationConfig, GranularityThresholds, PassCheck};
pub use embedding_config::EmbeddingConfig;

use crate::errors::{CoreResult, GroundingError};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GroundingConfig {
    pub embedding: EmbeddingConfig,
    pub citation: CitationConfig,
}

impl GroundingConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load and validate config, mapping parse failures into `ConfigError`.
    pub fn load(toml_str: &str) -> CoreResult<Self> {
        let config =
            Self::from_toml(toml_str).map_err(|e| GroundingError::ConfigError(e.to_string()))?;
        config.citation.validate()?;
        if config.embedding.dimensions == 0 {
            return Err(GroundingError::ConfigError(
                "embedding.dimensions must be > 0".to_string(),
            ));
        }
        if config.embedding.batch_size == 0 {
            return Err(GroundingError::ConfigError(
                "embedding.batch_size must be > 0".to_string(),
            ));
        }
        Ok(config)
    }
}
