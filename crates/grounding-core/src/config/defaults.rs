// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "lexical";
pub const DEFAULT_FALLBACK_TO_LEXICAL: bool = false;
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_API_KEY_ENV: &str = "EMBEDDING_API_KEY";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 64;
pub const DEFAULT_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// --- Corpus ---
pub const DEFAULT_WINDOW_SIZE: usize = 3;
pub const DEFAULT_PARAGRAPH_GROUP_SIZE: usize = 5;

// --- Search ---
pub const DEFAULT_TOP_K: usize = 3;

// --- Policy A (summaries, action items) ---
pub const DEFAULT_SUMMARY_SENTENCE_THRESHOLD: f32 = 0.80;
pub const DEFAULT_SUMMARY_PARAGRAPH_THRESHOLD: f32 = 0.73;
pub const DEFAULT_SUMMARY_CHUNK_THRESHOLD: f32 = 0.78;

// --- Policy B (question answers) ---
pub const DEFAULT_ANSWER_SENTENCE_THRESHOLD: f32 = 0.88;
pub const DEFAULT_ANSWER_PARAGRAPH_THRESHOLD: f32 = 0.80;
pub const DEFAULT_ANSWER_CHUNK_THRESHOLD: f32 = 0.84;
