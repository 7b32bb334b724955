//! HTTP embedding provider for OpenAI-compatible `/v1/embeddings` endpoints.
//!
//! Works with hosted APIs and with self-hosted sentence-transformer servers
//! that speak the same JSON shape. Transport errors, 429 and 5xx responses
//! are retried with exponential backoff; after exhausting retries the
//! provider reports itself unavailable until reset. Other 4xx responses
//! reject only the request that caused them: no retry, and the provider
//! stays available.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use grounding_core::config::EmbeddingConfig;
use grounding_core::errors::{CoreResult, EmbeddingError, GroundingError};
use grounding_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
const BASE_BACKOFF_MS: u64 = 100;
/// Backoff stops doubling after this many retries (6.4s).
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

pub struct ApiProvider {
    client: reqwest::blocking::Client,
    model: String,
    api_key: Option<String>,
    endpoint: String,
    dimensions: usize,
    available: AtomicBool,
    max_retries: u32,
}

/// Why one HTTP attempt failed.
enum RequestFailure {
    /// The endpoint refused this input; the same request will fail again.
    Rejected(GroundingError),
    /// Worth retrying, and a sign the endpoint is unhealthy if it persists.
    Transient(GroundingError),
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

impl ApiProvider {
    pub fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        endpoint: Option<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> CoreResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("http client: {e}"),
            })?;

        Ok(Self {
            client,
            model: model.into(),
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            dimensions,
            available: AtomicBool::new(true),
            max_retries: 3,
        })
    }

    /// Build from config, reading the API key from `config.api_key_env`.
    ///
    /// A missing key is allowed for self-hosted endpoints.
    pub fn from_config(config: &EmbeddingConfig) -> CoreResult<Self> {
        let api_key = std::env::var(&config.api_key_env).ok();
        let provider = Self::new(
            config.model.clone(),
            api_key,
            config.endpoint.clone(),
            config.dimensions,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(provider.with_max_retries(config.max_retries))
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Reset availability (e.g., after the endpoint recovers).
    pub fn reset_availability(&self) {
        self.available.store(true, Ordering::Relaxed);
    }

    fn request_embeddings(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff(attempt));
                debug!(attempt, "retrying embedding request");
            }

            match self.send_request(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(RequestFailure::Rejected(e)) => {
                    warn!(endpoint = %self.endpoint, error = %e, texts = texts.len(), "embedding request rejected");
                    return Err(e);
                }
                Err(RequestFailure::Transient(e)) => {
                    warn!(attempt, endpoint = %self.endpoint, error = %e, "embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        self.available.store(false, Ordering::Relaxed);
        Err(last_err.unwrap_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            }
            .into()
        }))
    }

    fn send_request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RequestFailure> {
        let mut request = self.client.post(&self.endpoint).json(&EmbedRequest {
            model: &self.model,
            input: texts,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let transient = |reason: String| {
            RequestFailure::Transient(EmbeddingError::InferenceFailed { reason }.into())
        };

        let response = request
            .send()
            .map_err(|e| transient(format!("HTTP error: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| transient(format!("reading body: {e}")))?;
        if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RequestFailure::Rejected(
                EmbeddingError::InputRejected {
                    status: status.as_u16(),
                    reason: body,
                }
                .into(),
            ));
        }
        if !status.is_success() {
            return Err(transient(format!("API returned {status}: {body}")));
        }

        parse_response(&body).map_err(RequestFailure::Transient)
    }
}

/// Delay before retry number `attempt` (1-based): 100ms doubling, capped.
fn backoff(attempt: u32) -> Duration {
    let doublings = attempt.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
    Duration::from_millis(BASE_BACKOFF_MS << doublings)
}

/// Decode a response body into vectors ordered by their `index` field.
pub(crate) fn parse_response(body: &str) -> CoreResult<Vec<Vec<f32>>> {
    let resp: EmbedResponse =
        serde_json::from_str(body).map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;

    let mut data = resp.data;
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
