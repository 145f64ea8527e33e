use super::{EmbeddingProvider, OllamaConfig};
use crate::errors::EmbeddingError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Client for the Ollama `/api/embed` endpoint
///
/// Transient failures (connection errors, 5xx, 429) are retried with
/// exponential backoff before an error is reported.
pub struct OllamaEmbedder {
    client: ClientWithMiddleware,
    endpoint: String,
    model: String,
    batch_size: usize,
}

impl OllamaEmbedder {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let base_url = config.base_url();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        info!(
            base_url = %base_url,
            model = %config.model,
            batch_size = config.batch_size,
            max_retries = config.max_retries,
            "Initializing Ollama embedder"
        );

        Ok(Self {
            client,
            endpoint: format!("{}/api/embed", base_url),
            model: config.model,
            batch_size: config.batch_size.max(1),
        })
    }

    /// Get the configured batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Generate embeddings for one request-sized batch of texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Unavailable(format!("Failed to reach Ollama: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Ollama embedding request failed");
            return Err(EmbeddingError::Unavailable(format!(
                "Ollama returned HTTP {status}: {body}"
            )));
        }

        let parsed: EmbedResponse = response.json().await.map_err(|e| {
            EmbeddingError::Unavailable(format!("Failed to parse Ollama response: {e}"))
        })?;

        if parsed.embeddings.len() != texts.len() {
            warn!(
                expected = texts.len(),
                got = parsed.embeddings.len(),
                "Embedding count mismatch"
            );
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                got: parsed.embeddings.len(),
            });
        }

        Ok(parsed.embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn model_version(&self) -> &str {
        &self.model
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            debug!(texts = chunk.len(), "Requesting embeddings from Ollama");
            all_embeddings.extend(self.embed_batch(chunk).await?);
        }

        Ok(all_embeddings)
    }
}
