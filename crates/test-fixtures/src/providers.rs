//! Deterministic embedding doubles.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use grounding_core::errors::{CoreResult, EmbeddingError};
use grounding_core::traits::IEmbeddingProvider;

/// Returns registered vectors for known texts and a hash-seeded unit vector
/// for everything else. Counts calls so tests can assert batching.
pub struct LookupProvider {
    name: String,
    dims: usize,
    vectors: HashMap<String, Vec<f32>>,
    poisoned: HashSet<String>,
    batch_calls: AtomicUsize,
    texts_embedded: AtomicUsize,
}

impl LookupProvider {
    pub fn new(dims: usize) -> Self {
        Self {
            name: "lookup".to_string(),
            dims,
            vectors: HashMap::new(),
            poisoned: HashSet::new(),
            batch_calls: AtomicUsize::new(0),
            texts_embedded: AtomicUsize::new(0),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Register the exact vector returned for `text`. The length is not
    /// checked, which lets tests simulate a misbehaving model.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Any call that includes `text` fails.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.poisoned.insert(text.to_string());
        self
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::SeqCst)
    }

    fn vector_for(&self, text: &str) -> CoreResult<Vec<f32>> {
        if self.poisoned.contains(text) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("poisoned text: {text}"),
            }
            .into());
        }
        if let Some(v) = self.vectors.get(text) {
            return Ok(v.clone());
        }
        Ok(seeded_unit_vector(text, self.dims))
    }
}

/// A unit vector derived from an FNV-1a hash of `text`.
pub fn seeded_unit_vector(text: &str, dims: usize) -> Vec<f32> {
    let mut state: u64 = 0xcbf29ce484222325;
    for b in text.as_bytes() {
        state ^= u64::from(*b);
        state = state.wrapping_mul(0x100000001b3);
    }
    let mut v: Vec<f32> = (0..dims)
        .map(|_| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 40) as f32 / (1u64 << 24) as f32 - 0.5
        })
        .collect();
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

impl IEmbeddingProvider for LookupProvider {
    fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        self.texts_embedded.fetch_add(1, Ordering::SeqCst);
        self.vector_for(text)
    }

    fn embed_batch(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        texts.iter().map(|t| self.vector_for(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// A provider that always fails.
pub struct FailingProvider {
    dims: usize,
}

impl FailingProvider {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }
}

impl IEmbeddingProvider for FailingProvider {
    fn embed(&self, _text: &str) -> CoreResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "mock failure".to_string(),
        }
        .into())
    }

    fn embed_batch(&self, _texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "mock failure".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "failing-mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}
