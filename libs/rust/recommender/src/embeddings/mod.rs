//! Text-to-vector providers
//!
//! This module provides:
//! - The `EmbeddingProvider` capability consumed by the matching engine
//! - An Ollama HTTP client
//! - An in-process fastembed model (behind the `fastembed` feature)
//! - A deterministic feature-hashing embedder that needs no model

#[cfg(feature = "fastembed")]
mod fastembed;
mod hash;
mod ollama;
mod types;

#[cfg(feature = "fastembed")]
pub use self::fastembed::FastEmbedder;
pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedder;
pub use types::{EmbedderConfig, EmbedderKind, OllamaConfig};

use crate::errors::EmbeddingError;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Converts texts to fixed-length vectors.
///
/// The i-th vector returned belongs to the i-th input text, and every vector
/// from one provider instance has the same length. Implementations must be
/// deterministic for a fixed model and must report an error rather than
/// return empty or zero-filled output when they cannot embed.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Identifier of the model producing the vectors.
    fn model_version(&self) -> &str;

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Construct the provider named by `config.kind`.
///
/// There is no fallback: a provider that cannot be built is an error.
pub fn build_provider(config: &EmbedderConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.kind {
        EmbedderKind::Ollama => Arc::new(OllamaEmbedder::new(config.ollama.clone())?),
        EmbedderKind::Hash => Arc::new(HashEmbedder::new(config.hash_dimension)),
        #[cfg(feature = "fastembed")]
        EmbedderKind::FastEmbed => Arc::new(FastEmbedder::new()?),
        #[cfg(not(feature = "fastembed"))]
        EmbedderKind::FastEmbed => {
            anyhow::bail!("fastembed provider requested but the `fastembed` feature is not enabled")
        }
    };

    info!(
        kind = %config.kind,
        model = %provider.model_version(),
        "Embedding provider initialized"
    );

    Ok(provider)
}
