//! Tests for cosine ranking.

use crate::features::FeatureMatrix;
use crate::similarity::{cosine_scores, most_similar, rank_by_cosine};

fn matrix() -> FeatureMatrix {
    FeatureMatrix::from_rows(
        5,
        2,
        vec![
            1.0, 0.0, //
            0.0, 1.0, //
            2.0, 0.0, //
            0.0, 0.0, //
            1.0, 1.0,
        ],
    )
    .expect("matrix")
}

#[test]
fn test_scores_include_reference() {
    let scores = cosine_scores(&matrix(), 0);
    assert_eq!(scores.len(), 5);
    assert!((scores[0] - 1.0).abs() < 1e-12);
    assert!((scores[2] - 1.0).abs() < 1e-12);
    assert_eq!(scores[3], 0.0);
}

#[test]
fn test_ranking_excludes_reference_and_sorts_descending() {
    let ranked = rank_by_cosine(&matrix(), 0);
    let rows: Vec<usize> = ranked.iter().map(|s| s.row).collect();
    // 2 (1.0), 4 (~0.707), then the two zero scores in row order.
    assert_eq!(rows, vec![2, 4, 1, 3]);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_equal_scores_keep_row_order() {
    let m = FeatureMatrix::from_rows(4, 1, vec![1.0, 3.0, 2.0, 5.0]).expect("matrix");
    assert_eq!(most_similar(&m, 2, 3), vec![0, 1, 3]);
}

#[test]
fn test_zero_reference_ranks_everything_equal() {
    assert_eq!(most_similar(&matrix(), 3, 10), vec![0, 1, 2, 4]);
}

#[test]
fn test_count_truncates_without_padding() {
    assert_eq!(most_similar(&matrix(), 0, 1), vec![2]);
    assert_eq!(most_similar(&matrix(), 0, 50).len(), 4);
    assert!(most_similar(&matrix(), 0, 0).is_empty());
}
