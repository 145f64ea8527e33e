use thiserror::Error;

/// Failure of an embedding provider, or of the vectors it returned.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("no texts supplied for embedding")]
    EmptyInput,

    #[error("embedding model unavailable: {0}")]
    Unavailable(String),

    #[error("embedding request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("embedding count mismatch: expected {expected}, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("provider returned zero-length embeddings")]
    EmptyVector,

    #[error("embedding {index} contains a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Failure of a recommendation run.
///
/// Each variant is surfaced to the caller unchanged; the engine never retries.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("no objectives provided")]
    NoObjectivesProvided,

    #[error("skill catalog is empty")]
    EmptyCatalog,

    #[error("embedding provider unavailable: {0}")]
    EmbeddingProviderUnavailable(#[from] EmbeddingError),
}
