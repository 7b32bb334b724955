mod claim;
mod corpus;
mod degradation_event;
mod granularity;
mod grounding_result;
mod transcript;

pub use claim::{Claim, ClaimKind, EmbeddedClaim};
pub use corpus::{GranularityCorpus, TranscriptCorpora};
pub use degradation_event::DegradationEvent;
pub use granularity::Granularity;
pub use grounding_result::{GranularityDiagnostic, GroundingResult, ScoredUnit};
pub use transcript::{TranscriptUnit, TranscriptUnits};
