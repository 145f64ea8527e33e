use crate::catalog::SkillCatalog;
use crate::embeddings::EmbeddingProvider;
use crate::errors::{EmbeddingError, RecommendError};
use crate::similarity::{SimilarityMatrix, top_k_indices};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Deduplicated skill labels recommended for a set of objectives.
///
/// Callers must treat this as an unordered set; equality ignores order.
/// Iteration yields labels in the order they were first selected (objective
/// order, then rank within the objective).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet {
    skills: Vec<String>,
    #[serde(skip)]
    catalog_indices: HashSet<usize>,
}

impl RecommendationSet {
    fn insert(&mut self, catalog_index: usize, label: &str) -> bool {
        if !self.catalog_indices.insert(catalog_index) {
            return false;
        }
        self.skills.push(label.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.skills
    }
}

impl PartialEq for RecommendationSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|skill| other.contains(skill))
    }
}

impl Eq for RecommendationSet {}

impl IntoIterator for RecommendationSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.into_iter()
    }
}

/// One selected skill for one objective
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub catalog_index: usize,
    pub skill: String,
    pub score: f32,
}

/// The ranked top-k selection for a single objective
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveMatches {
    pub objective: String,
    pub matches: Vec<SkillMatch>,
}

/// Result of a run including per-objective diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub skills: RecommendationSet,
    pub per_objective: Vec<ObjectiveMatches>,
    /// The top-k actually applied after clamping
    pub top_k: usize,
}

/// Clamp a requested per-objective count into `[1, catalog_len]`.
///
/// Zero becomes one and anything above the catalog size becomes the catalog
/// size. An empty catalog clamps to one; it is rejected before selection.
pub fn clamp_top_k(requested: usize, catalog_len: usize) -> usize {
    requested.clamp(1, catalog_len.max(1))
}

/// Recommend skills for `objectives` from `catalog`.
pub async fn recommend(
    objectives: &[String],
    catalog: &SkillCatalog,
    top_k_per_objective: usize,
    provider: &dyn EmbeddingProvider,
) -> Result<RecommendationSet, RecommendError> {
    run(objectives, catalog, top_k_per_objective, provider, None)
        .await
        .map(|recommendation| recommendation.skills)
}

/// Like [`recommend`], keeping the per-objective selections.
pub async fn recommend_detailed(
    objectives: &[String],
    catalog: &SkillCatalog,
    top_k_per_objective: usize,
    provider: &dyn EmbeddingProvider,
) -> Result<Recommendation, RecommendError> {
    run(objectives, catalog, top_k_per_objective, provider, None).await
}

/// Matching engine bound to one provider instance.
///
/// Holds no per-call state; clones share the provider and may run
/// concurrently as long as the provider allows it.
#[derive(Clone)]
pub struct MatchingEngine {
    provider: Arc<dyn EmbeddingProvider>,
    embed_timeout: Option<Duration>,
}

impl MatchingEngine {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            embed_timeout: None,
        }
    }

    /// Bound each of the two embedding calls by `timeout`.
    pub fn with_embed_timeout(mut self, timeout: Duration) -> Self {
        self.embed_timeout = Some(timeout);
        self
    }

    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    pub async fn recommend(
        &self,
        objectives: &[String],
        catalog: &SkillCatalog,
        top_k_per_objective: usize,
    ) -> Result<RecommendationSet, RecommendError> {
        self.recommend_detailed(objectives, catalog, top_k_per_objective)
            .await
            .map(|recommendation| recommendation.skills)
    }

    pub async fn recommend_detailed(
        &self,
        objectives: &[String],
        catalog: &SkillCatalog,
        top_k_per_objective: usize,
    ) -> Result<Recommendation, RecommendError> {
        run(
            objectives,
            catalog,
            top_k_per_objective,
            self.provider.as_ref(),
            self.embed_timeout,
        )
        .await
    }
}

async fn run(
    objectives: &[String],
    catalog: &SkillCatalog,
    top_k_per_objective: usize,
    provider: &dyn EmbeddingProvider,
    embed_timeout: Option<Duration>,
) -> Result<Recommendation, RecommendError> {
    let objectives = usable_objectives(objectives);
    if objectives.is_empty() {
        return Err(RecommendError::NoObjectivesProvided);
    }
    if catalog.is_empty() {
        return Err(RecommendError::EmptyCatalog);
    }

    let top_k = clamp_top_k(top_k_per_objective, catalog.len());
    if top_k != top_k_per_objective {
        debug!(
            requested = top_k_per_objective,
            applied = top_k,
            catalog_size = catalog.len(),
            "Clamped top_k_per_objective"
        );
    }

    info!(
        objectives = objectives.len(),
        catalog_size = catalog.len(),
        top_k = top_k,
        model = %provider.model_version(),
        "Generating skill recommendations"
    );

    // If either call fails the other is dropped and nothing is scored
    let (objective_vectors, skill_vectors) = tokio::try_join!(
        embed_batch(provider, &objectives, embed_timeout),
        embed_batch(provider, catalog.labels(), embed_timeout),
    )?;

    validate_vectors(&objective_vectors, &skill_vectors)?;

    let matrix = SimilarityMatrix::compute(&objective_vectors, &skill_vectors);

    let mut skills = RecommendationSet::default();
    let mut per_objective = Vec::with_capacity(objectives.len());

    for (row_index, objective) in objectives.into_iter().enumerate() {
        let row = matrix.row(row_index).unwrap_or_default();
        let mut matches = Vec::with_capacity(top_k);

        for catalog_index in top_k_indices(row, top_k) {
            let Some(label) = catalog.get(catalog_index) else {
                continue;
            };
            skills.insert(catalog_index, label);
            matches.push(SkillMatch {
                catalog_index,
                skill: label.to_string(),
                score: row[catalog_index],
            });
        }

        debug!(
            objective = %objective,
            matches = ?matches.iter().map(|m| (m.skill.as_str(), m.score)).collect::<Vec<_>>(),
            "Objective matched"
        );

        per_objective.push(ObjectiveMatches { objective, matches });
    }

    info!(recommended = skills.len(), "Skill recommendations generated");

    Ok(Recommendation {
        skills,
        per_objective,
        top_k,
    })
}

/// Trimmed objectives, skipping blank entries.
fn usable_objectives(objectives: &[String]) -> Vec<String> {
    let usable: Vec<String> = objectives
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    let skipped = objectives.len() - usable.len();
    if skipped > 0 {
        warn!(skipped = skipped, "Skipping blank objectives");
    }

    usable
}

async fn embed_batch(
    provider: &dyn EmbeddingProvider,
    texts: &[String],
    embed_timeout: Option<Duration>,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let vectors = match embed_timeout {
        Some(limit) => tokio::time::timeout(limit, provider.embed(texts))
            .await
            .map_err(|_| EmbeddingError::Timeout(limit))??,
        None => provider.embed(texts).await?,
    };

    if vectors.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: texts.len(),
            got: vectors.len(),
        });
    }

    Ok(vectors)
}

/// All vectors share one non-zero length and hold only finite values.
///
/// `NonFinite::index` counts objectives first, then skills.
fn validate_vectors(objectives: &[Vec<f32>], skills: &[Vec<f32>]) -> Result<(), EmbeddingError> {
    let dimension = objectives.first().map(Vec::len).unwrap_or(0);
    if dimension == 0 {
        return Err(EmbeddingError::EmptyVector);
    }

    for (index, vector) in objectives.iter().chain(skills.iter()).enumerate() {
        if vector.len() != dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimension,
                got: vector.len(),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(EmbeddingError::NonFinite { index });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(0, 3), 1);
        assert_eq!(clamp_top_k(2, 3), 2);
        assert_eq!(clamp_top_k(5, 3), 3);
        assert_eq!(clamp_top_k(5, 0), 1);
    }

    #[test]
    fn test_recommendation_set_dedupes_by_catalog_index() {
        let mut set = RecommendationSet::default();
        assert!(set.insert(2, "Cloud Computing"));
        assert!(set.insert(0, "AI & Big Data"));
        assert!(!set.insert(2, "Cloud Computing"));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["Cloud Computing", "AI & Big Data"]
        );
    }

    #[test]
    fn test_recommendation_set_equality_ignores_order() {
        let mut a = RecommendationSet::default();
        a.insert(0, "x");
        a.insert(1, "y");
        let mut b = RecommendationSet::default();
        b.insert(1, "y");
        b.insert(0, "x");
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&b).unwrap(), r#"["y","x"]"#);
    }

    #[test]
    fn test_validate_vectors() {
        let ok = validate_vectors(&[vec![1.0, 0.0]], &[vec![0.0, 0.0]]);
        assert!(ok.is_ok());

        let mismatch = validate_vectors(&[vec![1.0, 0.0]], &[vec![1.0]]);
        assert!(matches!(
            mismatch,
            Err(EmbeddingError::DimensionMismatch { expected: 2, got: 1 })
        ));

        let empty = validate_vectors(&[vec![]], &[vec![]]);
        assert!(matches!(empty, Err(EmbeddingError::EmptyVector)));

        let nan = validate_vectors(&[vec![1.0]], &[vec![1.0], vec![f32::NAN]]);
        assert!(matches!(nan, Err(EmbeddingError::NonFinite { index: 2 })));
    }

    #[test]
    fn test_usable_objectives_trims_and_skips_blank() {
        let objectives = vec!["  grow  ".to_string(), " ".to_string(), String::new()];
        assert_eq!(usable_objectives(&objectives), vec!["grow".to_string()]);
    }
}
