//! Grounding policies.
//!
//! `ThresholdOr` grounds summaries and action items: a claim passes if any
//! granularity's nearest unit meets that granularity's threshold (`>=`), and
//! is then cited from the granularity with the highest top-1 score.
//! `Margin` grounds question answers: a claim passes only if some
//! granularity's top-1 score exceeds its threshold by a strictly positive
//! margin, and is cited from the granularity with the largest margin. Both
//! cite the top-1 unit of the best granularity; ties between
//! granularities go to sentence, then paragraph, then chunk.

use grounding_core::config::{CitationConfig, GranularityThresholds, PassCheck};
use grounding_core::constants::NO_REFERENCE;
use grounding_core::errors::{CoreResult, GroundingError};
use grounding_core::models::{
    ClaimKind, EmbeddedClaim, GranularityDiagnostic, GroundingResult, ScoredUnit,
    TranscriptCorpora,
};
use serde::{Deserialize, Serialize};

use crate::search;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GroundingPolicy {
    ThresholdOr {
        thresholds: GranularityThresholds,
        pass_check: PassCheck,
    },
    Margin {
        thresholds: GranularityThresholds,
    },
}

impl GroundingPolicy {
    /// The policy a claim of `kind` is judged by under `config`.
    pub fn for_kind(kind: ClaimKind, config: &CitationConfig) -> Self {
        match kind {
            ClaimKind::SummarySentence | ClaimKind::ActionItem => Self::ThresholdOr {
                thresholds: config.summary_thresholds,
                pass_check: config.pass_check,
            },
            ClaimKind::Answer => Self::Margin {
                thresholds: config.answer_thresholds,
            },
        }
    }

    pub fn thresholds(&self) -> &GranularityThresholds {
        match self {
            Self::ThresholdOr { thresholds, .. } | Self::Margin { thresholds } => thresholds,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ThresholdOr { .. } => "threshold_or",
            Self::Margin { .. } => "margin",
        }
    }

    /// Ground one claim against all three corpora.
    ///
    /// # Errors
    /// `InvalidArgument` for empty claim text or `k == 0`;
    /// `DimensionMismatch` when the claim embedding does not match the corpora.
    pub fn decide(
        &self,
        claim: &EmbeddedClaim,
        corpora: &TranscriptCorpora,
        k: usize,
    ) -> CoreResult<GroundingResult> {
        if claim.claim.text.trim().is_empty() {
            return Err(GroundingError::invalid_argument("claim text is empty"));
        }
        if k == 0 {
            return Err(GroundingError::invalid_argument("k must be > 0"));
        }
        if let Some(dims) = corpora.dimensions() {
            if dims != claim.embedding.len() {
                return Err(GroundingError::DimensionMismatch {
                    expected: dims,
                    actual: claim.embedding.len(),
                });
            }
        }

        let thresholds = self.thresholds();
        let diagnostics = corpora
            .iter()
            .map(|corpus| {
                let g = corpus.granularity();
                Ok(GranularityDiagnostic {
                    granularity: g,
                    threshold: thresholds.get(g),
                    top_k: search::top_k(&claim.embedding, corpus, k)?,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let decision = match self {
            Self::ThresholdOr { pass_check, .. } => threshold_or(&diagnostics, *pass_check),
            Self::Margin { .. } => margin(&diagnostics),
        };

        Ok(match decision {
            Decision::Pass { diagnostic, score } => {
                let best = &diagnostics[diagnostic];
                let granularity = best.granularity;
                let (citation_text, citation_index) = best
                    .top1()
                    .map(|s| (s.unit.text.clone(), Some(s.unit.index)))
                    .unwrap_or_default();
                GroundingResult {
                    claim: claim.claim.clone(),
                    passed: true,
                    best_granularity: Some(granularity),
                    citation_text,
                    citation_index,
                    similarity_score: score,
                    diagnostics,
                }
            }
            Decision::Fail { score } => GroundingResult {
                claim: claim.claim.clone(),
                passed: false,
                best_granularity: None,
                citation_text: NO_REFERENCE.to_string(),
                citation_index: None,
                similarity_score: score,
                diagnostics,
            },
        })
    }
}

enum Decision {
    Pass { diagnostic: usize, score: f32 },
    Fail { score: f32 },
}

fn threshold_or(diagnostics: &[GranularityDiagnostic], pass_check: PassCheck) -> Decision {
    let passes = |d: &GranularityDiagnostic| match pass_check {
        PassCheck::AnyOfTopK => d.top_k.iter().any(|s| s.score >= d.threshold),
        PassCheck::TopOne => d.top1().is_some_and(|s| s.score >= d.threshold),
    };

    let passed = diagnostics.iter().any(passes);

    // The citation comes from the highest top-1 overall, whether or not that
    // granularity met its own threshold. Diagnostics arrive in priority
    // order; strict `>` keeps the earlier granularity on ties.
    let mut best: Option<(usize, f32)> = None;
    for (i, d) in diagnostics.iter().enumerate() {
        let Some(top1) = d.top1() else { continue };
        if best.map_or(true, |(_, b)| top1.score > b) {
            best = Some((i, top1.score));
        }
    }

    match best {
        Some((diagnostic, score)) if passed => Decision::Pass { diagnostic, score },
        Some((_, score)) => Decision::Fail { score },
        None => Decision::Fail { score: 0.0 },
    }
}

fn margin(diagnostics: &[GranularityDiagnostic]) -> Decision {
    let mut best: Option<(usize, f32, &ScoredUnit)> = None;
    for (i, d) in diagnostics.iter().enumerate() {
        let Some(top1) = d.top1() else { continue };
        let m = top1.score - d.threshold;
        if best.map_or(true, |(_, b, _)| m > b) {
            best = Some((i, m, top1));
        }
    }

    match best {
        Some((diagnostic, m, top1)) if m > 0.0 => Decision::Pass {
            diagnostic,
            score: top1.score,
        },
        Some((_, m, _)) => Decision::Fail { score: m },
        None => Decision::Fail { score: 0.0 },
    }
}
