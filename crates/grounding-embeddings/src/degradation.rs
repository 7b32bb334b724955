//! Fallback chain for embedding providers.
//!
//! Providers are tried in priority order. Once the chain falls back it stays
//! on the fallback, so one engine never mixes vectors from two providers
//! across calls. Every fallback is recorded as a `DegradationEvent`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use grounding_core::errors::{CoreResult, EmbeddingError, GroundingError};
use grounding_core::models::DegradationEvent;
use grounding_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Manages the degradation fallback chain for embedding providers.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    /// Index of the first provider still eligible.
    cursor: AtomicUsize,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            cursor: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed a batch with the first provider that succeeds.
    ///
    /// Returns the vectors and the name of the provider that produced them.
    pub fn embed_batch(&self, texts: &[String]) -> CoreResult<(Vec<Vec<f32>>, &str)> {
        let start = self.cursor.load(Ordering::Acquire);
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate().skip(start) {
            if !provider.is_available() {
                continue;
            }

            match provider.embed_batch(texts) {
                Ok(vecs) => {
                    if i > start {
                        self.record_fallback(start, i);
                    }
                    return Ok((vecs, provider.name()));
                }
                Err(e @ GroundingError::Embedding(EmbeddingError::InputRejected { .. })) => {
                    // A refused input says nothing about the provider's health.
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        texts = texts.len(),
                        "batch embed failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("all {} providers exhausted", self.chain.len()),
            }
            .into()
        }))
    }

    fn record_fallback(&self, from: usize, to: usize) {
        self.cursor.fetch_max(to, Ordering::AcqRel);
        let failed = self.chain[from].name().to_string();
        let fallback = self.chain[to].name().to_string();
        warn!(failed = %failed, fallback = %fallback, "embedding provider degraded");
        let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
        events.push(DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{failed} unavailable"),
            fallback_used: fallback,
            timestamp: Utc::now(),
        });
    }

    /// Name of the provider the next call will try first.
    pub fn active_provider_name(&self) -> &str {
        let start = self.cursor.load(Ordering::Acquire);
        self.chain
            .iter()
            .skip(start)
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *events)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
