use serde::{Deserialize, Serialize};

/// Where a claim came from. Decides which grounding policy applies by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    SummarySentence,
    Answer,
    ActionItem,
}

/// A unit of generated text to be grounded against the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    pub kind: ClaimKind,
    /// The question this claim answers, for `ClaimKind::Answer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_question: Option<String>,
}

impl Claim {
    pub fn summary_sentence(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ClaimKind::SummarySentence,
            source_question: None,
        }
    }

    pub fn answer(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            text: answer.into(),
            kind: ClaimKind::Answer,
            source_question: Some(question.into()),
        }
    }

    pub fn action_item(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ClaimKind::ActionItem,
            source_question: None,
        }
    }
}

/// A claim paired with its embedding.
///
/// Claims are carried as an ordered list of these pairs rather than a map
/// keyed by text: two claims may share identical wording.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedClaim {
    pub claim: Claim,
    pub embedding: Vec<f32>,
}

impl EmbeddedClaim {
    pub fn new(claim: Claim, embedding: Vec<f32>) -> Self {
        Self { claim, embedding }
    }
}
