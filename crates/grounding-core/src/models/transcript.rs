use serde::{Deserialize, Serialize};

use super::Granularity;

/// A span of transcript text at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptUnit {
    pub text: String,
    pub granularity: Granularity,
    /// Position within its granularity's ordered sequence.
    pub index: usize,
}

impl TranscriptUnit {
    pub fn new(text: impl Into<String>, granularity: Granularity, index: usize) -> Self {
        Self {
            text: text.into(),
            granularity,
            index,
        }
    }
}

/// Sentences and paragraphs as delivered by the transcription service.
///
/// Chunks are never authored here; the corpus builder derives them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptUnits {
    #[serde(default)]
    pub sentences: Vec<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl TranscriptUnits {
    pub fn new(sentences: Vec<String>, paragraphs: Vec<String>) -> Self {
        Self {
            sentences,
            paragraphs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty() && self.paragraphs.is_empty()
    }
}
