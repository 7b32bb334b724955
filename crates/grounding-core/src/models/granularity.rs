use std::fmt;

use serde::{Deserialize, Serialize};

/// The ways transcript text is cut up for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Sentence,
    Paragraph,
    Chunk,
}

impl Granularity {
    /// Tie-break order when two granularities score equally.
    pub const PRIORITY: [Granularity; 3] = [
        Granularity::Sentence,
        Granularity::Paragraph,
        Granularity::Chunk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
            Self::Chunk => "chunk",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
