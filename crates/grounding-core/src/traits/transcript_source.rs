use crate::errors::CoreResult;
use crate::models::TranscriptUnits;

/// Source of segmented transcripts, keyed by an opaque handle.
pub trait ITranscriptSource: Send + Sync {
    /// Sentences and paragraphs of the transcript behind `handle`.
    fn transcript_units(&self, handle: &str) -> CoreResult<TranscriptUnits>;
}
