mod embedding;
mod transcript_source;

pub use embedding::IEmbeddingProvider;
pub use transcript_source::ITranscriptSource;
