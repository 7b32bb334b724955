//! Exhaustive cosine top-k over one granularity corpus.

use std::cmp::Ordering;

use grounding_core::errors::{CoreResult, GroundingError};
use grounding_core::models::{GranularityCorpus, ScoredUnit};

/// Cosine similarity between two vectors of equal length.
/// Returns 0.0 for zero-magnitude or non-finite input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    let sim = dot / denom;
    if denom < f64::EPSILON || !sim.is_finite() {
        0.0
    } else {
        sim.clamp(-1.0, 1.0) as f32
    }
}

/// The `k` units most similar to `query`, by descending score.
///
/// Ties keep the lower index first. An empty corpus yields an empty list.
///
/// # Errors
/// `InvalidArgument` when `k == 0`; `DimensionMismatch` when the query and
/// corpus disagree on dimension.
pub fn top_k(query: &[f32], corpus: &GranularityCorpus, k: usize) -> CoreResult<Vec<ScoredUnit>> {
    if k == 0 {
        return Err(GroundingError::invalid_argument("k must be > 0"));
    }
    let Some(dims) = corpus.dimensions() else {
        return Ok(Vec::new());
    };
    if dims != query.len() {
        return Err(GroundingError::DimensionMismatch {
            expected: dims,
            actual: query.len(),
        });
    }

    let mut scored: Vec<(usize, f32)> = corpus
        .embeddings()
        .iter()
        .enumerate()
        .map(|(i, e)| (i, cosine_similarity(query, e)))
        .collect();
    scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    scored.truncate(k);

    let units = corpus.units();
    Ok(scored
        .into_iter()
        .map(|(i, score)| ScoredUnit {
            unit: units[i].clone(),
            score,
        })
        .collect())
}
