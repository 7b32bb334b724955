use serde::{Deserialize, Serialize};

use super::{Claim, Granularity, TranscriptUnit};

/// A corpus unit with its cosine similarity to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUnit {
    pub unit: TranscriptUnit,
    /// Cosine similarity in [-1.0, 1.0].
    pub score: f32,
}

/// Nearest neighbours found within one granularity, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranularityDiagnostic {
    pub granularity: Granularity,
    pub threshold: f32,
    /// Sorted by descending score. Empty when the corpus is empty.
    pub top_k: Vec<ScoredUnit>,
}

impl GranularityDiagnostic {
    pub fn top1(&self) -> Option<&ScoredUnit> {
        self.top_k.first()
    }
}

/// Grounding decision for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingResult {
    pub claim: Claim,
    pub passed: bool,
    /// `None` when no granularity grounded the claim.
    pub best_granularity: Option<Granularity>,
    /// The cited transcript passage, or `NO_REFERENCE`.
    pub citation_text: String,
    /// Index of the cited unit within its granularity.
    pub citation_index: Option<usize>,
    /// Raw similarity of the citation. On a failed margin-policy decision this
    /// is the best (non-positive) margin instead.
    pub similarity_score: f32,
    pub diagnostics: Vec<GranularityDiagnostic>,
}
