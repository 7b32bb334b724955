//! GroundingEvaluator: builds corpora, embeds claims, and runs the policy
//! for each claim's kind.
//!
//! Claims are independent: each is decided in parallel against the same
//! read-only corpora, and one claim's failure never affects another.

use grounding_core::config::CitationConfig;
use grounding_core::errors::{CoreResult, GroundingError};
use grounding_core::models::{Claim, EmbeddedClaim, GroundingResult, TranscriptCorpora, TranscriptUnits};
use grounding_core::traits::{IEmbeddingProvider, ITranscriptSource};
use grounding_embeddings::validation;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::corpus::CorpusBuilder;
use crate::policy::GroundingPolicy;
use crate::report::{ClaimFailure, GroundingReport};

/// Decide every claim under one policy, in input order.
///
/// Duplicate claims are evaluated separately and appear once per occurrence.
pub fn evaluate_claims(
    claims: &[EmbeddedClaim],
    corpora: &TranscriptCorpora,
    policy: &GroundingPolicy,
    k: usize,
) -> Vec<CoreResult<GroundingResult>> {
    claims
        .par_iter()
        .map(|claim| policy.decide(claim, corpora, k))
        .collect()
}

pub struct GroundingEvaluator<'a> {
    provider: &'a dyn IEmbeddingProvider,
    builder: CorpusBuilder,
    config: CitationConfig,
}

impl<'a> GroundingEvaluator<'a> {
    pub fn new(provider: &'a dyn IEmbeddingProvider, config: CitationConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            builder: CorpusBuilder::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &CitationConfig {
        &self.config
    }

    pub fn build_corpora(&self, units: &TranscriptUnits) -> CoreResult<TranscriptCorpora> {
        self.builder.build(units, self.provider)
    }

    /// Fetch the transcript behind `handle` and build its corpora.
    pub fn build_corpora_for(
        &self,
        source: &dyn ITranscriptSource,
        handle: &str,
    ) -> CoreResult<TranscriptCorpora> {
        let units = source.transcript_units(handle)?;
        debug!(
            handle,
            sentences = units.sentences.len(),
            paragraphs = units.paragraphs.len(),
            "transcript loaded"
        );
        self.build_corpora(&units)
    }

    /// Embed claims, keeping input order.
    ///
    /// All non-empty claims go to the provider in one batch. If that batch
    /// fails, each claim is retried alone so a single bad claim fails only
    /// itself. Empty claims fail with `InvalidArgument`.
    pub fn embed_claims(&self, claims: Vec<Claim>) -> Vec<Result<EmbeddedClaim, ClaimFailure>> {
        let dims = self.provider.dimensions();
        let texts: Vec<String> = claims
            .iter()
            .filter(|c| !is_blank(c))
            .map(|c| c.text.clone())
            .collect();

        let mut batch = if texts.is_empty() {
            None
        } else {
            match self
                .provider
                .embed_batch(&texts)
                .and_then(|v| validation::validate_batch(&v, texts.len(), dims).map(|()| v))
            {
                Ok(v) => Some(v.into_iter()),
                Err(e) => {
                    warn!(error = %e, claims = texts.len(), "claim batch failed, embedding individually");
                    None
                }
            }
        };

        claims
            .into_iter()
            .map(|claim| {
                if is_blank(&claim) {
                    return Err(ClaimFailure::new(
                        claim,
                        GroundingError::invalid_argument("claim text is empty"),
                    ));
                }
                let embedding = match batch.as_mut().and_then(Iterator::next) {
                    Some(v) => Ok(v),
                    None => self.embed_one(&claim.text, dims),
                };
                match embedding {
                    Ok(e) => Ok(EmbeddedClaim::new(claim, e)),
                    Err(error) => {
                        debug!(%error, claim = %claim.text, "claim embedding failed");
                        Err(ClaimFailure::new(claim, error))
                    }
                }
            })
            .collect()
    }

    fn embed_one(&self, text: &str, dims: usize) -> CoreResult<Vec<f32>> {
        let v = self.provider.embed(text)?;
        validation::validate_dimensions(&v, dims)?;
        Ok(v)
    }

    /// Embed and ground claims of any kind against prebuilt corpora.
    pub fn evaluate(&self, claims: Vec<Claim>, corpora: &TranscriptCorpora) -> GroundingReport {
        let k = self.config.top_k;
        let outcomes: Vec<_> = self
            .embed_claims(claims)
            .into_par_iter()
            .map(|embedded| {
                let claim = embedded?;
                let policy = GroundingPolicy::for_kind(claim.claim.kind, &self.config);
                policy
                    .decide(&claim, corpora, k)
                    .map_err(|e| ClaimFailure::new(claim.claim, e))
            })
            .collect();

        let report = GroundingReport::new(outcomes);
        let summary = report.summary();
        info!(
            total = summary.total,
            passed = summary.passed,
            filtered = summary.filtered,
            failed = summary.failed,
            "grounding complete"
        );
        report
    }

    /// Load a transcript, build its corpora, and ground `claims` against it.
    ///
    /// # Errors
    /// Transcript lookup and corpus build failures are fatal; per-claim
    /// failures are reported inside the returned report.
    pub fn ground(
        &self,
        source: &dyn ITranscriptSource,
        handle: &str,
        claims: Vec<Claim>,
    ) -> CoreResult<GroundingReport> {
        let corpora = self.build_corpora_for(source, handle)?;
        Ok(self.evaluate(claims, &corpora))
    }
}

fn is_blank(claim: &Claim) -> bool {
    claim.text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grounding_core::models::{ClaimKind, Granularity};
    use test_fixtures::providers::{FailingProvider, LookupProvider};

    fn units() -> TranscriptUnits {
        TranscriptUnits::new(
            vec![
                "A cat sat on a mat.".to_string(),
                "It was sunny.".to_string(),
                "The cat purred.".to_string(),
            ],
            vec!["A cat sat on a mat. It was sunny. The cat purred.".to_string()],
        )
    }

    #[test]
    fn invalid_config_is_rejected() {
        let provider = LookupProvider::new(8);
        let config = CitationConfig {
            top_k: 0,
            ..CitationConfig::default()
        };
        assert!(GroundingEvaluator::new(&provider, config).is_err());
    }

    #[test]
    fn blank_claim_fails_alone() {
        let provider = LookupProvider::new(8);
        let evaluator = GroundingEvaluator::new(&provider, CitationConfig::default()).unwrap();
        let embedded = evaluator.embed_claims(vec![
            Claim::summary_sentence("The cat purred."),
            Claim::summary_sentence("  "),
        ]);
        assert!(embedded[0].is_ok());
        assert!(matches!(
            embedded[1].as_ref().unwrap_err().error,
            GroundingError::InvalidArgument { .. }
        ));
        assert_eq!(provider.batch_calls(), 1);
    }

    #[test]
    fn failed_batch_falls_back_to_single_claims() {
        let provider = LookupProvider::new(8).failing_on("poison");
        let evaluator = GroundingEvaluator::new(&provider, CitationConfig::default()).unwrap();
        let embedded = evaluator.embed_claims(vec![
            Claim::summary_sentence("fine"),
            Claim::summary_sentence("poison"),
            Claim::summary_sentence("also fine"),
        ]);
        assert!(embedded[0].is_ok());
        assert!(embedded[1].is_err());
        assert!(embedded[2].is_ok());
        assert_eq!(embedded[2].as_ref().unwrap().claim.text, "also fine");
    }

    #[test]
    fn corpus_failure_is_fatal() {
        let provider = FailingProvider::new(8);
        let evaluator = GroundingEvaluator::new(&provider, CitationConfig::default()).unwrap();
        assert!(evaluator.build_corpora(&units()).is_err());
    }

    #[test]
    fn exact_sentence_is_cited() {
        let provider = LookupProvider::new(16);
        let evaluator = GroundingEvaluator::new(&provider, CitationConfig::default()).unwrap();
        let corpora = evaluator.build_corpora(&units()).unwrap();
        let report = evaluator.evaluate(
            vec![
                Claim::summary_sentence("The cat purred."),
                Claim::answer("What did the cat do?", "The cat purred."),
            ],
            &corpora,
        );
        for result in report.results() {
            assert!(result.passed, "{:?}", result.claim.kind);
            assert_eq!(result.best_granularity, Some(Granularity::Sentence));
            assert_eq!(result.citation_text, "The cat purred.");
            assert_eq!(result.citation_index, Some(2));
        }
        assert_eq!(report.results().count(), 2);
        assert_eq!(report.outcomes[1].as_ref().unwrap().claim.kind, ClaimKind::Answer);
    }

    #[test]
    fn evaluate_claims_preserves_order() {
        let provider = LookupProvider::new(16);
        let evaluator = GroundingEvaluator::new(&provider, CitationConfig::default()).unwrap();
        let corpora = evaluator.build_corpora(&units()).unwrap();
        let claims: Vec<EmbeddedClaim> = evaluator
            .embed_claims(vec![
                Claim::summary_sentence("It was sunny."),
                Claim::summary_sentence("A cat sat on a mat."),
            ])
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        let policy = GroundingPolicy::for_kind(ClaimKind::SummarySentence, evaluator.config());
        let results = evaluate_claims(&claims, &corpora, &policy, 3);
        assert_eq!(results[0].as_ref().unwrap().citation_index, Some(1));
        assert_eq!(results[1].as_ref().unwrap().citation_index, Some(0));
    }
}
