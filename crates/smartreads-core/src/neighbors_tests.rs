//! Tests for the brute-force neighbour index.

use crate::distance::DistanceMetric;
use crate::features::FeatureMatrix;
use crate::neighbors::NearestNeighbors;

fn line() -> FeatureMatrix {
    // Points on a line at 0, 1, 3, 6, 10.
    FeatureMatrix::from_rows(5, 1, vec![0.0, 1.0, 3.0, 6.0, 10.0]).expect("matrix")
}

#[test]
fn test_kneighbors_ascending_distance() {
    let matrix = line();
    let index = NearestNeighbors::fit(&matrix, DistanceMetric::Euclidean);
    let hits = index.kneighbors_of_row(1, 4);
    let rows: Vec<usize> = hits.iter().map(|h| h.row).collect();
    assert_eq!(rows, vec![1, 0, 2, 3]);
    assert_eq!(hits[0].score, 0.0);
    assert!((hits[1].score - 1.0).abs() < 1e-12);
    assert!((hits[2].score - 2.0).abs() < 1e-12);
    assert!((hits[3].score - 5.0).abs() < 1e-12);
}

#[test]
fn test_equidistant_rows_keep_row_order() {
    // From 3, both 0 and 6 sit at distance 3; the lower row wins.
    let matrix = line();
    let index = NearestNeighbors::fit(&matrix, DistanceMetric::Euclidean);
    let hits = index.kneighbors_of_row(2, 4);
    let rows: Vec<usize> = hits.iter().map(|h| h.row).collect();
    assert_eq!(rows, vec![2, 1, 0, 3]);
    assert!((hits[2].score - hits[3].score).abs() < 1e-12);
}

#[test]
fn test_ties_break_by_row_index() {
    let matrix = FeatureMatrix::from_rows(4, 1, vec![5.0, 4.0, 6.0, 5.0]).expect("matrix");
    let index = NearestNeighbors::fit(&matrix, DistanceMetric::Euclidean);
    let rows: Vec<usize> = index
        .kneighbors(&[5.0], 4)
        .into_iter()
        .map(|h| h.row)
        .collect();
    assert_eq!(rows, vec![0, 3, 1, 2]);
}

#[test]
fn test_k_larger_than_index_returns_all() {
    let matrix = line();
    let index = NearestNeighbors::fit(&matrix, DistanceMetric::Euclidean);
    assert_eq!(index.len(), 5);
    assert_eq!(index.kneighbors(&[0.0], 50).len(), 5);
    assert!(index.kneighbors(&[0.0], 0).is_empty());
}

#[test]
fn test_cosine_metric_index() {
    let matrix =
        FeatureMatrix::from_rows(3, 2, vec![1.0, 0.0, 0.0, 1.0, 2.0, 0.1]).expect("matrix");
    let index = NearestNeighbors::fit(&matrix, DistanceMetric::Cosine);
    assert_eq!(index.metric(), DistanceMetric::Cosine);
    let rows: Vec<usize> = index
        .kneighbors(&[1.0, 0.0], 3)
        .into_iter()
        .map(|h| h.row)
        .collect();
    assert_eq!(rows, vec![0, 2, 1]);
}
