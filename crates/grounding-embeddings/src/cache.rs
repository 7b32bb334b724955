//! In-memory embedding cache using moka.
//!
//! TinyLFU admission, size-bounded eviction, idle TTL.
//! Keys are blake3 hashes of provider name and text, so vectors from
//! different providers never alias.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory embedding cache.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a new cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    /// Cache key for `text` embedded by `provider`.
    pub fn key(provider: &str, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(provider.as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    /// Number of entries currently in the cache (eventually consistent).
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
