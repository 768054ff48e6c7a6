//! Cosine similarity ranking over feature rows.

use std::cmp::Ordering;

use crate::distance::cosine_similarity;
use crate::features::FeatureMatrix;

/// A candidate row with its score against the reference row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    /// Row index in the catalog.
    pub row: usize,
    /// Similarity (higher is closer) or distance (lower is closer),
    /// depending on the producer.
    pub score: f64,
}

/// Cosine similarity of `reference` against every row, including itself.
#[must_use]
pub fn cosine_scores(matrix: &FeatureMatrix, reference: usize) -> Vec<f64> {
    let query = matrix.row(reference);
    matrix
        .iter_rows()
        .map(|row| cosine_similarity(query, row))
        .collect()
}

/// Orders by descending score, then ascending row index.
pub(crate) fn by_score_desc(a: &ScoredRow, b: &ScoredRow) -> Ordering {
    b.score.total_cmp(&a.score).then(a.row.cmp(&b.row))
}

/// Every row except `reference`, ranked by descending cosine similarity.
///
/// Ties are broken by ascending row index so equal scores keep catalog order.
#[must_use]
pub fn rank_by_cosine(matrix: &FeatureMatrix, reference: usize) -> Vec<ScoredRow> {
    let mut ranked: Vec<ScoredRow> = cosine_scores(matrix, reference)
        .into_iter()
        .enumerate()
        .map(|(row, score)| ScoredRow { row, score })
        .collect();
    ranked.sort_by(by_score_desc);
    ranked.retain(|s| s.row != reference);
    ranked
}

/// The `count` rows most similar to `reference`, excluding it.
///
/// Returns fewer than `count` rows when the matrix is smaller; never pads.
#[must_use]
pub fn most_similar(matrix: &FeatureMatrix, reference: usize, count: usize) -> Vec<usize> {
    rank_by_cosine(matrix, reference)
        .into_iter()
        .take(count)
        .map(|s| s.row)
        .collect()
}
