//! Per-claim outcomes and the grounded text assembled from them.

use grounding_core::constants::TEXT_JOINER;
use grounding_core::errors::GroundingError;
use grounding_core::models::{Claim, GroundingResult};
use serde::{Deserialize, Serialize};

/// A claim that could not be evaluated at all.
#[derive(Debug)]
pub struct ClaimFailure {
    pub claim: Claim,
    pub error: GroundingError,
}

impl ClaimFailure {
    pub fn new(claim: Claim, error: GroundingError) -> Self {
        Self { claim, error }
    }
}

/// Evaluated (passed or filtered) or failed.
pub type ClaimOutcome = Result<GroundingResult, ClaimFailure>;

/// Outcomes in the same order as the submitted claims.
#[derive(Debug, Default)]
pub struct GroundingReport {
    pub outcomes: Vec<ClaimOutcome>,
}

/// Counts for logging and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub filtered: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

impl GroundingReport {
    pub fn new(outcomes: Vec<ClaimOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Claims that were evaluated, passed or not.
    pub fn results(&self) -> impl Iterator<Item = &GroundingResult> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn passed(&self) -> impl Iterator<Item = &GroundingResult> {
        self.results().filter(|r| r.passed)
    }

    /// Evaluated claims that no granularity grounded.
    pub fn filtered(&self) -> impl Iterator<Item = &GroundingResult> {
        self.results().filter(|r| !r.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ClaimFailure> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    /// Text of the passing claims in submission order, space-joined.
    pub fn grounded_text(&self) -> String {
        self.passed()
            .map(|r| r.claim.text.as_str())
            .collect::<Vec<_>>()
            .join(TEXT_JOINER)
    }

    /// Share of evaluated claims that passed; 0.0 when none were evaluated.
    pub fn pass_rate(&self) -> f64 {
        let evaluated = self.results().count();
        if evaluated == 0 {
            return 0.0;
        }
        self.passed().count() as f64 / evaluated as f64
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            total: self.outcomes.len(),
            passed: self.passed().count(),
            filtered: self.filtered().count(),
            failed: self.failures().count(),
            pass_rate: self.pass_rate(),
        }
    }
}
