//! # grounding-core
//!
//! Foundation crate for transcript grounding.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GroundingConfig;
pub use errors::{CoreResult, EmbeddingError, GroundingError};
pub use models::{
    Claim, ClaimKind, EmbeddedClaim, Granularity, GranularityCorpus, GroundingResult,
    TranscriptCorpora, TranscriptUnit, TranscriptUnits,
};
