//! Multi-granularity corpus builder.
//!
//! Sentences and paragraphs come from the transcript; chunks are derived by
//! sliding a `window_size` window over the sentences with stride 1.

use grounding_core::config::CitationConfig;
use grounding_core::constants::TEXT_JOINER;
use grounding_core::errors::{CoreResult, GroundingError};
use grounding_core::models::{Granularity, GranularityCorpus, TranscriptCorpora, TranscriptUnits};
use grounding_core::traits::IEmbeddingProvider;
use grounding_embeddings::validation;
use tracing::{debug, info};

/// Overlapping windows of `window_size` consecutive sentences, space-joined.
///
/// Yields `max(0, n - window_size + 1)` chunks; fewer sentences than the
/// window yields none.
pub fn sliding_window(sentences: &[String], window_size: usize) -> CoreResult<Vec<String>> {
    if window_size == 0 {
        return Err(GroundingError::invalid_argument("window_size must be > 0"));
    }
    Ok(sentences
        .windows(window_size)
        .map(|w| w.join(TEXT_JOINER))
        .collect())
}

/// Consecutive non-overlapping groups of `group_size` sentences, space-joined.
/// The last group may be shorter.
pub fn group_sentences(sentences: &[String], group_size: usize) -> CoreResult<Vec<String>> {
    if group_size == 0 {
        return Err(GroundingError::invalid_argument("group_size must be > 0"));
    }
    Ok(sentences
        .chunks(group_size)
        .map(|g| g.join(TEXT_JOINER))
        .collect())
}

/// Builds the three corpora of a transcript.
#[derive(Debug, Clone, Copy)]
pub struct CorpusBuilder {
    window_size: usize,
    paragraph_group_size: usize,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::from_config(&CitationConfig::default())
    }
}

impl CorpusBuilder {
    pub fn new(window_size: usize, paragraph_group_size: usize) -> CoreResult<Self> {
        if window_size == 0 || paragraph_group_size == 0 {
            return Err(GroundingError::invalid_argument(format!(
                "window_size ({window_size}) and paragraph_group_size ({paragraph_group_size}) must be > 0"
            )));
        }
        Ok(Self {
            window_size,
            paragraph_group_size,
        })
    }

    /// Builder for a config that has already been validated.
    pub fn from_config(config: &CitationConfig) -> Self {
        Self {
            window_size: config.window_size.max(1),
            paragraph_group_size: config.paragraph_group_size.max(1),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Embed every unit at every granularity.
    ///
    /// Paragraphs fall back to fixed-size sentence groups when the transcript
    /// has sentences but no paragraphs. One provider call per non-empty
    /// granularity.
    ///
    /// # Errors
    /// Any embedding failure, short batch, or vector of the wrong dimension
    /// aborts the build; no partial corpora are returned.
    pub fn build(
        &self,
        units: &TranscriptUnits,
        provider: &dyn IEmbeddingProvider,
    ) -> CoreResult<TranscriptCorpora> {
        let paragraphs = if units.paragraphs.is_empty() && !units.sentences.is_empty() {
            debug!(
                group_size = self.paragraph_group_size,
                "no paragraphs supplied, grouping sentences"
            );
            group_sentences(&units.sentences, self.paragraph_group_size)?
        } else {
            units.paragraphs.clone()
        };
        let chunks = sliding_window(&units.sentences, self.window_size)?;

        let sentence = embed_corpus(Granularity::Sentence, units.sentences.clone(), provider)?;
        let paragraph = embed_corpus(Granularity::Paragraph, paragraphs, provider)?;
        let chunk = embed_corpus(Granularity::Chunk, chunks, provider)?;

        info!(
            sentences = sentence.len(),
            paragraphs = paragraph.len(),
            chunks = chunk.len(),
            window_size = self.window_size,
            provider = provider.name(),
            "transcript corpora built"
        );

        TranscriptCorpora::new(sentence, paragraph, chunk)
    }
}

fn embed_corpus(
    granularity: Granularity,
    texts: Vec<String>,
    provider: &dyn IEmbeddingProvider,
) -> CoreResult<GranularityCorpus> {
    if texts.is_empty() {
        return Ok(GranularityCorpus::empty(granularity));
    }
    let embeddings = provider.embed_batch(&texts)?;
    validation::validate_batch(&embeddings, texts.len(), provider.dimensions())?;
    GranularityCorpus::from_texts(granularity, texts, embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grounding_core::errors::EmbeddingError;
    use test_fixtures::providers::{FailingProvider, LookupProvider};

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn window_of_three_over_three_sentences() {
        let s = sentences(&["A cat sat on a mat.", "It was sunny.", "The cat purred."]);
        let chunks = sliding_window(&s, 3).unwrap();
        assert_eq!(
            chunks,
            vec!["A cat sat on a mat. It was sunny. The cat purred.".to_string()]
        );
    }

    #[test]
    fn window_larger_than_input_yields_nothing() {
        let s = sentences(&["one", "two"]);
        assert!(sliding_window(&s, 3).unwrap().is_empty());
        assert!(sliding_window(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn window_stride_is_one() {
        let s = sentences(&["a", "b", "c", "d"]);
        assert_eq!(sliding_window(&s, 2).unwrap(), vec!["a b", "b c", "c d"]);
    }

    #[test]
    fn zero_window_is_invalid() {
        assert!(matches!(
            sliding_window(&sentences(&["a"]), 0),
            Err(GroundingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn grouping_keeps_short_tail() {
        let s = sentences(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(group_sentences(&s, 5).unwrap(), vec!["a b c d e", "f g"]);
    }

    #[test]
    fn builder_rejects_zero_sizes() {
        assert!(CorpusBuilder::new(0, 5).is_err());
        assert!(CorpusBuilder::new(3, 0).is_err());
    }

    #[test]
    fn build_makes_one_call_per_non_empty_granularity() {
        let provider = LookupProvider::new(8);
        let units = TranscriptUnits::new(
            sentences(&["s1", "s2", "s3", "s4"]),
            sentences(&["p1"]),
        );
        let corpora = CorpusBuilder::default().build(&units, &provider).unwrap();
        assert_eq!(corpora.get(Granularity::Sentence).len(), 4);
        assert_eq!(corpora.get(Granularity::Paragraph).len(), 1);
        assert_eq!(corpora.get(Granularity::Chunk).len(), 2);
        assert_eq!(provider.batch_calls(), 3);
    }

    #[test]
    fn empty_transcript_builds_empty_corpora_without_calls() {
        let provider = LookupProvider::new(8);
        let corpora = CorpusBuilder::default()
            .build(&TranscriptUnits::default(), &provider)
            .unwrap();
        assert!(corpora.is_empty());
        assert_eq!(provider.batch_calls(), 0);
    }

    #[test]
    fn missing_paragraphs_fall_back_to_groups() {
        let provider = LookupProvider::new(8);
        let s: Vec<String> = (0..12).map(|i| format!("sentence {i}")).collect();
        let corpora = CorpusBuilder::new(3, 5)
            .unwrap()
            .build(&TranscriptUnits::new(s, Vec::new()), &provider)
            .unwrap();
        let paragraphs = corpora.get(Granularity::Paragraph);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs.units()[2].text, "sentence 10 sentence 11");
    }

    #[test]
    fn provider_failure_aborts_build() {
        let units = TranscriptUnits::new(sentences(&["a"]), sentences(&["b"]));
        let err = CorpusBuilder::default()
            .build(&units, &FailingProvider::new(8))
            .unwrap_err();
        assert!(matches!(err, GroundingError::Embedding(_)));
    }

    #[test]
    fn unexpected_dimension_aborts_build() {
        let provider = LookupProvider::new(8).with_vector("p1", vec![1.0; 4]);
        let units = TranscriptUnits::new(sentences(&["s1"]), sentences(&["p1"]));
        let err = CorpusBuilder::default().build(&units, &provider).unwrap_err();
        assert!(matches!(
            err,
            GroundingError::Embedding(EmbeddingError::DimensionMismatch {
                expected: 8,
                actual: 4
            })
        ));
    }
}
