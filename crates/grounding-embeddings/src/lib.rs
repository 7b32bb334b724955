//! # grounding-embeddings
//!
//! Embedding generation for transcript units and claims.
//! Wraps an injected provider with batching, caching, dimension validation,
//! and an optional lexical fallback.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine (IEmbeddingProvider)
//! ├── DegradationChain (provider fallback)
//! │   ├── ApiProvider (OpenAI-compatible HTTP)
//! │   └── LexicalHashProvider (always available, opt-in fallback)
//! ├── EmbeddingCache (moka, keyed by blake3(provider, text))
//! └── validation (count + dimension checks)
//! ```

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;
pub mod validation;

pub use cache::EmbeddingCache;
pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use providers::{ApiProvider, LexicalHashProvider};
