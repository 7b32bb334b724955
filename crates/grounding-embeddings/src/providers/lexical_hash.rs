//! Lexical feature-hashing provider.
//!
//! Hashes unigrams and adjacent bigrams into a fixed number of signed
//! buckets, weights them by sublinear term frequency, and L2-normalizes.
//! No model, no I/O: deterministic and always available. Useful as a
//! baseline and for air-gapped runs; far weaker than a neural model.

use std::collections::HashMap;

use grounding_core::errors::CoreResult;
use grounding_core::traits::IEmbeddingProvider;

pub struct LexicalHashProvider {
    dimensions: usize,
}

impl LexicalHashProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a over the feature bytes.
    fn hash_feature(feature: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in feature.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    fn features(tokens: &[String]) -> HashMap<String, f32> {
        let mut counts: HashMap<String, f32> = HashMap::new();
        for tok in tokens {
            *counts.entry(tok.clone()).or_default() += 1.0;
        }
        for pair in tokens.windows(2) {
            // Bigrams count half so word order nudges rather than dominates.
            *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 0.5;
        }
        counts
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }

        let tokens = Self::tokenize(text);
        for (feature, count) in Self::features(&tokens) {
            let h = Self::hash_feature(&feature);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            let weight = if count >= 1.0 { 1.0 + count.ln() } else { count };
            vec[bucket] += sign * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for LexicalHashProvider {
    fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "lexical-hash"
    }

    fn is_available(&self) -> bool {
        true
    }
}
