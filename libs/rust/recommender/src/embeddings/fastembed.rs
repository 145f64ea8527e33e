use super::EmbeddingProvider;
use crate::errors::EmbeddingError;
use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const MODEL_VERSION: &str = "all-MiniLM-L6-v2";

/// In-process sentence embedding model
pub struct FastEmbedder {
    model: Arc<TextEmbedding>,
}

impl FastEmbedder {
    pub fn new() -> Result<Self> {
        info!(model = MODEL_VERSION, "Initializing embedding model...");

        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
        )
        .context("Failed to initialize embedding model")?;

        info!("Embedding model initialized successfully");

        Ok(Self {
            model: Arc::new(model),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedder {
    fn model_version(&self) -> &str {
        MODEL_VERSION
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        // ONNX inference is CPU bound
        tokio::task::spawn_blocking(move || model.embed(texts, None))
            .await
            .map_err(|e| EmbeddingError::Unavailable(format!("Embedding task failed: {e}")))?
            .map_err(|e| EmbeddingError::Unavailable(format!("Failed to generate embeddings: {e}")))
    }
}
