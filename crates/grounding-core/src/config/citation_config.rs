use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{CoreResult, GroundingError};
use crate::models::Granularity;

/// One similarity threshold per granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranularityThresholds {
    pub sentence: f32,
    pub paragraph: f32,
    pub chunk: f32,
}

impl GranularityThresholds {
    pub fn new(sentence: f32, paragraph: f32, chunk: f32) -> Self {
        Self {
            sentence,
            paragraph,
            chunk,
        }
    }

    /// Thresholds for summaries and action items (threshold-OR policy).
    pub fn summary() -> Self {
        Self::new(
            defaults::DEFAULT_SUMMARY_SENTENCE_THRESHOLD,
            defaults::DEFAULT_SUMMARY_PARAGRAPH_THRESHOLD,
            defaults::DEFAULT_SUMMARY_CHUNK_THRESHOLD,
        )
    }

    /// Stricter thresholds for question answers (margin policy).
    pub fn answer() -> Self {
        Self::new(
            defaults::DEFAULT_ANSWER_SENTENCE_THRESHOLD,
            defaults::DEFAULT_ANSWER_PARAGRAPH_THRESHOLD,
            defaults::DEFAULT_ANSWER_CHUNK_THRESHOLD,
        )
    }

    pub fn get(&self, granularity: Granularity) -> f32 {
        match granularity {
            Granularity::Sentence => self.sentence,
            Granularity::Paragraph => self.paragraph,
            Granularity::Chunk => self.chunk,
        }
    }

    pub fn set(&mut self, granularity: Granularity, value: f32) {
        match granularity {
            Granularity::Sentence => self.sentence = value,
            Granularity::Paragraph => self.paragraph = value,
            Granularity::Chunk => self.chunk = value,
        }
    }

    fn validate(&self, label: &str) -> CoreResult<()> {
        for g in Granularity::PRIORITY {
            let t = self.get(g);
            if !t.is_finite() {
                return Err(GroundingError::invalid_argument(format!(
                    "{label} threshold for {g} is not finite: {t}"
                )));
            }
        }
        Ok(())
    }
}

/// How the threshold-OR policy decides whether one granularity passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassCheck {
    /// Pass if any of the k nearest units meets the threshold.
    #[default]
    AnyOfTopK,
    /// Pass only if the nearest unit meets the threshold.
    TopOne,
}

/// Corpus, search, and policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationConfig {
    /// Sentences per sliding-window chunk.
    pub window_size: usize,
    /// Nearest neighbours kept per granularity.
    pub top_k: usize,
    /// Sentences per paragraph when a transcript has no paragraphs.
    pub paragraph_group_size: usize,
    /// Per-granularity pass check for the threshold-OR policy.
    pub pass_check: PassCheck,
    pub summary_thresholds: GranularityThresholds,
    pub answer_thresholds: GranularityThresholds,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::DEFAULT_WINDOW_SIZE,
            top_k: defaults::DEFAULT_TOP_K,
            paragraph_group_size: defaults::DEFAULT_PARAGRAPH_GROUP_SIZE,
            pass_check: PassCheck::default(),
            summary_thresholds: GranularityThresholds::summary(),
            answer_thresholds: GranularityThresholds::answer(),
        }
    }
}

impl CitationConfig {
    /// Reject settings the corpus builder or search cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.window_size == 0 {
            return Err(GroundingError::invalid_argument("window_size must be > 0"));
        }
        if self.top_k == 0 {
            return Err(GroundingError::invalid_argument("top_k must be > 0"));
        }
        if self.paragraph_group_size == 0 {
            return Err(GroundingError::invalid_argument(
                "paragraph_group_size must be > 0",
            ));
        }
        self.summary_thresholds.validate("summary")?;
        self.answer_thresholds.validate("answer")
    }
}
