//! # grounding-citations
//!
//! Decides whether generated claims are grounded in a transcript and cites
//! the passage that supports each one.
//!
//! ## Architecture
//!
//! ```text
//! GroundingEvaluator
//! ├── CorpusBuilder (sentences, paragraphs, sliding-window chunks → embeddings)
//! ├── search (cosine top-k per granularity)
//! ├── GroundingPolicy
//! │   ├── ThresholdOr (summaries, action items)
//! │   └── Margin (question answers)
//! └── GroundingReport (passed / filtered / failed, grounded text)
//! ```
//!
//! Corpora are built once per transcript and never mutated; claims are
//! evaluated independently and in parallel.

pub mod claims;
pub mod corpus;
pub mod evaluator;
pub mod policy;
pub mod report;
pub mod search;
pub mod source;

pub use corpus::CorpusBuilder;
pub use evaluator::{evaluate_claims, GroundingEvaluator};
pub use policy::GroundingPolicy;
pub use report::{ClaimFailure, ClaimOutcome, GroundingReport, ReportSummary};
pub use source::InMemoryTranscriptSource;
