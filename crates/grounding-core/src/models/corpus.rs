use super::{Granularity, TranscriptUnit};
use crate::errors::{CoreResult, GroundingError};

/// Units of one granularity and their embeddings, in the same order.
///
/// Built once per transcript and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GranularityCorpus {
    granularity: Granularity,
    units: Vec<TranscriptUnit>,
    embeddings: Vec<Vec<f32>>,
}

impl GranularityCorpus {
    /// Build a corpus, checking that units and embeddings line up.
    pub fn new(
        granularity: Granularity,
        units: Vec<TranscriptUnit>,
        embeddings: Vec<Vec<f32>>,
    ) -> CoreResult<Self> {
        if units.len() != embeddings.len() {
            return Err(GroundingError::CorpusInvariant {
                reason: format!(
                    "{granularity} corpus has {} units but {} embeddings",
                    units.len(),
                    embeddings.len()
                ),
            });
        }

        for (position, unit) in units.iter().enumerate() {
            if unit.granularity != granularity || unit.index != position {
                return Err(GroundingError::CorpusInvariant {
                    reason: format!(
                        "unit {} ({}) at position {position} of {granularity} corpus",
                        unit.index, unit.granularity
                    ),
                });
            }
        }

        if let Some(first) = embeddings.first() {
            let dims = first.len();
            if let Some(bad) = embeddings.iter().find(|e| e.len() != dims) {
                return Err(GroundingError::DimensionMismatch {
                    expected: dims,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self {
            granularity,
            units,
            embeddings,
        })
    }

    /// Build a corpus from ordered texts, assigning indices by position.
    pub fn from_texts(
        granularity: Granularity,
        texts: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> CoreResult<Self> {
        let units = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| TranscriptUnit::new(text, granularity, index))
            .collect();
        Self::new(granularity, units, embeddings)
    }

    pub fn empty(granularity: Granularity) -> Self {
        Self {
            granularity,
            units: Vec::new(),
            embeddings: Vec::new(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn units(&self) -> &[TranscriptUnit] {
        &self.units
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Embedding dimension, or `None` for an empty corpus.
    pub fn dimensions(&self) -> Option<usize> {
        self.embeddings.first().map(Vec::len)
    }
}

/// The three corpora of one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptCorpora {
    sentence: GranularityCorpus,
    paragraph: GranularityCorpus,
    chunk: GranularityCorpus,
}

impl TranscriptCorpora {
    /// Bundle three corpora. Each must carry its own granularity, and all
    /// non-empty corpora must share one embedding dimension.
    pub fn new(
        sentence: GranularityCorpus,
        paragraph: GranularityCorpus,
        chunk: GranularityCorpus,
    ) -> CoreResult<Self> {
        let corpora = Self {
            sentence,
            paragraph,
            chunk,
        };

        let mut dims: Option<usize> = None;
        for g in Granularity::PRIORITY {
            let corpus = corpora.get(g);
            if corpus.granularity() != g {
                return Err(GroundingError::CorpusInvariant {
                    reason: format!("{} corpus supplied in the {g} slot", corpus.granularity()),
                });
            }
            match (dims, corpus.dimensions()) {
                (Some(expected), Some(actual)) if expected != actual => {
                    return Err(GroundingError::DimensionMismatch { expected, actual });
                }
                (None, Some(actual)) => dims = Some(actual),
                _ => {}
            }
        }

        Ok(corpora)
    }

    pub fn get(&self, granularity: Granularity) -> &GranularityCorpus {
        match granularity {
            Granularity::Sentence => &self.sentence,
            Granularity::Paragraph => &self.paragraph,
            Granularity::Chunk => &self.chunk,
        }
    }

    /// Corpora in priority order: sentence, paragraph, chunk.
    pub fn iter(&self) -> impl Iterator<Item = &GranularityCorpus> {
        Granularity::PRIORITY.into_iter().map(|g| self.get(g))
    }

    /// Shared embedding dimension, or `None` if every corpus is empty.
    pub fn dimensions(&self) -> Option<usize> {
        self.iter().find_map(GranularityCorpus::dimensions)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(GranularityCorpus::is_empty)
    }
}
