use super::EmbeddingProvider;
use crate::errors::EmbeddingError;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Weight of a whole word relative to one of its character trigrams
const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic feature-hashing embedder
///
/// Each lower-cased word and each of its boundary-padded character trigrams
/// is hashed into one of `dimension` buckets with a hash-derived sign, then
/// the vector is L2 normalised. Texts sharing vocabulary score high; texts
/// with no alphanumeric content embed as the zero vector.
///
/// Changing the token scheme changes every vector, so bump `VERSION` with it.
pub struct HashEmbedder {
    dimension: usize,
    model_version: String,
}

impl HashEmbedder {
    const VERSION: &'static str = "hash-v1";

    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            dimension,
            model_version: format!("{}-{}", Self::VERSION, dimension),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Bucket index and sign for one feature
    fn bucket(&self, feature: &str) -> (usize, f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let index = (u64::from_le_bytes(bytes) % self.dimension as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let lowered = text.to_lowercase();

        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let (index, sign) = self.bucket(&format!("w:{word}"));
            vector[index] += sign * WORD_WEIGHT;

            let padded: Vec<char> = format!("#{word}#").chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                let (index, sign) = self.bucket(&format!("t:{trigram}"));
                vector[index] += sign * TRIGRAM_WEIGHT;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn model_version(&self) -> &str {
        &self.model_version
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
