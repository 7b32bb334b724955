use std::collections::HashMap;

use grounding_core::errors::{CoreResult, GroundingError};
use grounding_core::models::TranscriptUnits;
use grounding_core::traits::ITranscriptSource;

/// Transcripts held in memory, keyed by handle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptSource {
    transcripts: HashMap<String, TranscriptUnits>,
}

impl InMemoryTranscriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `handle -> { sentences, paragraphs }`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let transcripts: HashMap<String, TranscriptUnits> = serde_json::from_str(json)?;
        Ok(Self { transcripts })
    }

    pub fn insert(&mut self, handle: impl Into<String>, units: TranscriptUnits) {
        self.transcripts.insert(handle.into(), units);
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }
}

impl ITranscriptSource for InMemoryTranscriptSource {
    fn transcript_units(&self, handle: &str) -> CoreResult<TranscriptUnits> {
        self.transcripts
            .get(handle)
            .cloned()
            .ok_or_else(|| GroundingError::TranscriptNotFound {
                handle: handle.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_handle_is_not_found() {
        let source = InMemoryTranscriptSource::new();
        assert!(matches!(
            source.transcript_units("missing"),
            Err(GroundingError::TranscriptNotFound { .. })
        ));
    }

    #[test]
    fn json_with_missing_paragraphs_parses() {
        let source =
            InMemoryTranscriptSource::from_json(r#"{"t": {"sentences": ["a", "b"]}}"#).unwrap();
        let units = source.transcript_units("t").unwrap();
        assert_eq!(units.sentences.len(), 2);
        assert!(units.paragraphs.is_empty());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            InMemoryTranscriptSource::from_json("[1, 2"),
            Err(GroundingError::Serialization(_))
        ));
    }
}
