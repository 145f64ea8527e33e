//! Semantic skill recommendation.
//!
//! Objectives and a skill catalog are embedded by an injected
//! [`EmbeddingProvider`], scored against each other by cosine similarity and
//! reduced to a deduplicated [`RecommendationSet`].

pub mod catalog;
pub mod embeddings;
pub mod engine;
pub mod errors;
pub mod similarity;

pub use catalog::SkillCatalog;
pub use embeddings::{
    EmbedderConfig, EmbedderKind, EmbeddingProvider, HashEmbedder, OllamaConfig, OllamaEmbedder,
    build_provider,
};
#[cfg(feature = "fastembed")]
pub use embeddings::FastEmbedder;
pub use engine::{
    MatchingEngine, ObjectiveMatches, Recommendation, RecommendationSet, SkillMatch,
    clamp_top_k, recommend, recommend_detailed,
};
pub use errors::{EmbeddingError, RecommendError};
pub use similarity::{SimilarityMatrix, cosine_similarity, top_k_indices};

/// Number of skills selected per objective when no other value is configured.
pub const DEFAULT_TOP_K_PER_OBJECTIVE: usize = 5;
