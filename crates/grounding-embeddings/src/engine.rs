//! EmbeddingEngine: the main entry point for grounding-embeddings.
//!
//! Coordinates the provider chain, the cache, batching, and shape validation.
//! Implements `IEmbeddingProvider`, so it is what callers inject into the
//! corpus builder and claim embedder.

use grounding_core::config::EmbeddingConfig;
use grounding_core::errors::{CoreResult, EmbeddingError, GroundingError};
use grounding_core::models::DegradationEvent;
use grounding_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::EmbeddingCache;
use crate::degradation::DegradationChain;
use crate::providers;
use crate::validation;

/// The main embedding engine.
pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: EmbeddingCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    ///
    /// # Errors
    /// `ConfigError` for zero dimensions, zero batch size, or an unknown provider.
    pub fn new(config: EmbeddingConfig) -> CoreResult<Self> {
        let primary = providers::create_provider(&config)?;
        Self::with_provider(primary, config)
    }

    /// Create an engine around an injected provider.
    pub fn with_provider(
        primary: Box<dyn IEmbeddingProvider>,
        config: EmbeddingConfig,
    ) -> CoreResult<Self> {
        if config.dimensions == 0 || config.batch_size == 0 {
            return Err(GroundingError::ConfigError(format!(
                "dimensions ({}) and batch_size ({}) must be > 0",
                config.dimensions, config.batch_size
            )));
        }

        let mut chain = DegradationChain::new();
        chain.push(primary);
        if config.fallback_to_lexical {
            chain.push(Box::new(providers::LexicalHashProvider::new(
                config.dimensions,
            )));
        }

        let cache = EmbeddingCache::new(config.cache_size);

        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            batch_size = config.batch_size,
            fallback = config.fallback_to_lexical,
            "EmbeddingEngine initialized"
        );

        Ok(Self {
            chain,
            cache,
            config,
        })
    }

    /// Embed texts in order, serving repeats from the cache and sending
    /// misses to the provider in `batch_size` slices.
    ///
    /// Every returned vector comes from one provider. If the chain falls back
    /// partway through, the whole call is redone under the new provider.
    ///
    /// # Errors
    /// Any provider failure, short batch, or wrong-dimension vector fails the
    /// whole call; nothing partial is returned.
    pub fn embed_texts(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        loop {
            let provider = self.chain.active_provider_name().to_string();
            if let Some(vecs) = self.embed_with(&provider, texts)? {
                return Ok(vecs);
            }
            debug!(
                from = %provider,
                to = self.chain.active_provider_name(),
                "provider changed mid-call, re-embedding"
            );
        }
    }

    /// One pass over `texts` expecting `provider` to serve every miss.
    /// `None` when some slice was served by a different provider.
    fn embed_with(&self, provider: &str, texts: &[String]) -> CoreResult<Option<Vec<Vec<f32>>>> {
        let mut out: Vec<Option<Vec<f32>>> = vec![None; texts.len()];

        let mut misses: Vec<usize> = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            match self.cache.get(&EmbeddingCache::key(provider, text)) {
                Some(vec) => out[i] = Some(vec),
                None => misses.push(i),
            }
        }

        debug!(
            texts = texts.len(),
            hits = texts.len() - misses.len(),
            "embedding cache lookup"
        );

        let mut switched = false;
        for slice in misses.chunks(self.config.batch_size) {
            let batch: Vec<String> = slice.iter().map(|&i| texts[i].clone()).collect();
            let (vecs, used) = self.chain.embed_batch(&batch)?;
            validation::validate_batch(&vecs, batch.len(), self.config.dimensions)?;

            for (text, vec) in batch.iter().zip(&vecs) {
                self.cache.insert(EmbeddingCache::key(used, text), vec.clone());
            }
            if used != provider {
                switched = true;
                continue;
            }
            for (&i, vec) in slice.iter().zip(vecs) {
                out[i] = Some(vec);
            }
        }
        if switched {
            return Ok(None);
        }

        out.into_iter()
            .map(|v| {
                v.ok_or_else(|| {
                    EmbeddingError::InferenceFailed {
                        reason: "missing embedding after batch".to_string(),
                    }
                    .into()
                })
            })
            .collect::<CoreResult<Vec<_>>>()
            .map(Some)
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// Get the active provider name.
    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn cache_len(&self) -> u64 {
        self.cache.len()
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        let mut vecs = self.embed_texts(&[text.to_string()])?;
        vecs.pop().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty result".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        self.embed_texts(texts)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "grounding-embedding-engine"
    }

    fn is_available(&self) -> bool {
        self.chain.active_provider_name() != "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexical_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            provider: "lexical".to_string(),
            dimensions: 128,
            batch_size: 4,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn engine_creates_with_lexical_provider() {
        let engine = lexical_engine();
        assert_eq!(engine.dimensions(), 128);
        assert_eq!(engine.active_provider(), "lexical-hash");
        assert!(engine.is_available());
    }

    #[test]
    fn unknown_provider_is_config_error() {
        let result = EmbeddingEngine::new(EmbeddingConfig {
            provider: "word2vec".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(GroundingError::ConfigError(_))));
    }

    #[test]
    fn zero_batch_size_is_config_error() {
        let result = EmbeddingEngine::new(EmbeddingConfig {
            batch_size: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn embed_returns_configured_dims() {
        let engine = lexical_engine();
        assert_eq!(engine.embed("test query").unwrap().len(), 128);
    }

    #[test]
    fn repeated_text_is_cached() {
        let engine = lexical_engine();
        let a = engine.embed("cached text").unwrap();
        let b = engine.embed("cached text").unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache_len(), 1);
    }

    #[test]
    fn batch_preserves_order_across_slices() {
        let engine = lexical_engine();
        let texts: Vec<String> = (0..10).map(|i| format!("sentence number {i}")).collect();
        let batch = engine.embed_batch(&texts).unwrap();
        assert_eq!(batch.len(), 10);
        for (text, vec) in texts.iter().zip(&batch) {
            assert_eq!(&engine.embed(text).unwrap(), vec);
        }
    }

    #[test]
    fn no_degradation_events_on_success() {
        let engine = lexical_engine();
        engine.embed("test").unwrap();
        assert!(engine.drain_degradation_events().is_empty());
    }
}
