use std::cmp::Ordering;
use tracing::warn;

/// Cosine similarity in `[-1, 1]`.
///
/// A pair where either vector has zero norm scores exactly `0.0`, as does a
/// pair whose score cannot be represented (overflowing norms).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "Vector dimensions don't match, returning zero similarity"
        );
        return 0.0;
    }

    cosine_with_norms(a, norm(a), b, norm(b))
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_with_norms(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let similarity = dot_product / (norm_a * norm_b);

    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Objective-by-skill cosine scores, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Scores every objective vector against every skill vector.
    ///
    /// Callers are expected to have checked that all vectors share one length.
    pub fn compute(objectives: &[Vec<f32>], skills: &[Vec<f32>]) -> Self {
        let skill_norms: Vec<f32> = skills.iter().map(|s| norm(s)).collect();
        let mut scores = Vec::with_capacity(objectives.len() * skills.len());

        for objective in objectives {
            let objective_norm = norm(objective);
            for (skill, skill_norm) in skills.iter().zip(skill_norms.iter()) {
                scores.push(cosine_with_norms(objective, objective_norm, skill, *skill_norm));
            }
        }

        Self {
            rows: objectives.len(),
            cols: skills.len(),
            scores,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Score of objective `row` against skill `col`.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.scores.get(row * self.cols + col).copied()
    }

    /// All skill scores for one objective, in catalog order.
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.scores.get(start..start + self.cols)
    }
}

/// Indices of the `k` highest scores, best first.
///
/// Equal scores rank the lower index first, so selection is deterministic.
/// `k` larger than `scores.len()` returns every index.
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let k = k.min(scores.len());
    if k == 0 {
        return Vec::new();
    }

    let by_rank = |a: &usize, b: &usize| {
        scores[*b]
            .partial_cmp(&scores[*a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(b))
    };

    let mut indices: Vec<usize> = (0..scores.len()).collect();
    if k < indices.len() {
        indices.select_nth_unstable_by(k - 1, by_rank);
        indices.truncate(k);
    }
    indices.sort_unstable_by(by_rank);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_and_opposite() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        let sim = cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector_is_zero() {
        let sim = cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_matrix_layout() {
        let objectives = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let skills = vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![1.0, 1.0]];
        let matrix = SimilarityMatrix::compute(&objectives, &skills);

        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        assert!((matrix.get(0, 0).unwrap() - 1.0).abs() < 1e-6);
        assert_eq!(matrix.get(0, 1), Some(0.0));
        assert_eq!(matrix.get(1, 1), Some(0.0));
        assert!((matrix.get(1, 2).unwrap() - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.row(1).map(<[f32]>::len), Some(3));
        assert!(matrix.row(2).is_none());
    }

    #[test]
    fn test_top_k_orders_by_score() {
        assert_eq!(top_k_indices(&[0.1, 0.9, 0.5, 0.7], 3), vec![1, 3, 2]);
    }

    #[test]
    fn test_top_k_ties_prefer_lower_index() {
        assert_eq!(top_k_indices(&[0.2, 0.8, 0.8, 0.8], 1), vec![1]);
        assert_eq!(top_k_indices(&[0.2, 0.8, 0.8, 0.8], 2), vec![1, 2]);
        assert_eq!(top_k_indices(&[0.0, -0.0, 0.0], 2), vec![0, 1]);
    }

    #[test]
    fn test_top_k_bounds() {
        assert!(top_k_indices(&[0.3, 0.1], 0).is_empty());
        assert_eq!(top_k_indices(&[0.3, 0.1], 10), vec![0, 1]);
        assert!(top_k_indices(&[], 3).is_empty());
    }
}
