//! Tests for truncated SVD.

use crate::distance::dot;
use crate::error::Error;
use crate::features::FeatureMatrix;
use crate::reduction::{symmetric_eigen, TruncatedSvd};

fn scaled_axes() -> FeatureMatrix {
    FeatureMatrix::from_rows(
        4,
        3,
        vec![
            3.0, 0.0, 0.0, //
            0.0, 2.0, 0.0, //
            0.0, 0.0, 1.0, //
            0.0, 0.0, 0.0,
        ],
    )
    .expect("matrix")
}

#[test]
fn test_jacobi_two_by_two() {
    let (values, vectors) = symmetric_eigen(vec![2.0, 1.0, 1.0, 2.0], 2);
    let mut sorted = values.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert!((sorted[0] - 3.0).abs() < 1e-10);
    assert!((sorted[1] - 1.0).abs() < 1e-10);
    // Eigenvectors are orthonormal columns.
    let col = |j: usize| [vectors[j], vectors[2 + j]];
    assert!(dot(&col(0), &col(1)).abs() < 1e-10);
    assert!((dot(&col(0), &col(0)) - 1.0).abs() < 1e-10);
}

#[test]
fn test_singular_values_of_scaled_axes() {
    let projection = TruncatedSvd::new(2)
        .fit_transform(&scaled_axes())
        .expect("fit");
    assert!((projection.singular_values[0] - 3.0).abs() < 1e-9);
    assert!((projection.singular_values[1] - 2.0).abs() < 1e-9);

    let z = &projection.embedding;
    assert_eq!(z.rows(), 4);
    assert_eq!(z.cols(), 2);
    assert!((z.row(0)[0] - 3.0).abs() < 1e-9);
    assert!(z.row(0)[1].abs() < 1e-9);
    assert!((z.row(1)[1] - 2.0).abs() < 1e-9);
    assert!(z.row(3).iter().all(|v| v.abs() < 1e-12));
}

#[test]
fn test_full_rank_projection_preserves_dot_products_tall() {
    // Rank 2, more rows than columns: goes through the column Gram matrix.
    let x = FeatureMatrix::from_rows(
        4,
        3,
        vec![
            1.0, 0.0, 1.0, //
            0.0, 1.0, 0.5, //
            1.0, 1.0, 1.5, //
            2.0, 0.0, 2.0,
        ],
    )
    .expect("matrix");
    assert_dot_products_preserved(&x, 2);
}

#[test]
fn test_full_rank_projection_preserves_dot_products_wide() {
    // Rank 2, more columns than rows: goes through the row Gram matrix.
    let x = FeatureMatrix::from_rows(
        3,
        5,
        vec![
            1.0, 0.0, 1.0, 0.0, 0.3, //
            0.0, 1.0, 0.0, 1.0, 0.7, //
            1.0, 1.0, 1.0, 1.0, 1.0,
        ],
    )
    .expect("matrix");
    assert_dot_products_preserved(&x, 2);
}

fn assert_dot_products_preserved(x: &FeatureMatrix, k: usize) {
    let projection = TruncatedSvd::new(k).fit_transform(x).expect("fit");
    let z = &projection.embedding;
    for i in 0..x.rows() {
        for j in 0..x.rows() {
            let original = dot(x.row(i), x.row(j));
            let latent = dot(z.row(i), z.row(j));
            assert!(
                (original - latent).abs() < 1e-8,
                "dot({i},{j}): original={original}, latent={latent}"
            );
        }
    }
}

#[test]
fn test_component_bounds() {
    let x = scaled_axes();
    assert_eq!(TruncatedSvd::max_components(4, 3), 2);
    assert!(matches!(
        TruncatedSvd::new(0).fit_transform(&x),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        TruncatedSvd::new(3).fit_transform(&x),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn test_single_row_has_no_valid_dimension() {
    let x = FeatureMatrix::from_rows(1, 4, vec![1.0, 0.0, 0.5, 0.5]).expect("matrix");
    assert_eq!(TruncatedSvd::max_components(1, 4), 0);
    assert!(TruncatedSvd::new(1).fit_transform(&x).is_err());
}

#[test]
fn test_fit_is_deterministic() {
    let matrix = crate::features::encode(
        &crate::synthetic::generate_catalog(150, 4).expect("catalog"),
    )
    .expect("encode");
    let a = TruncatedSvd::new(10).fit_transform(&matrix).expect("fit");
    let b = TruncatedSvd::new(10).fit_transform(&matrix).expect("fit");
    assert_eq!(a.embedding, b.embedding);
    assert_eq!(a.singular_values, b.singular_values);
}

#[test]
fn test_explained_variance_ratio_bounded() {
    let matrix = crate::features::encode(
        &crate::synthetic::generate_catalog(150, 4).expect("catalog"),
    )
    .expect("encode");
    let projection = TruncatedSvd::new(5).fit_transform(&matrix).expect("fit");
    let total: f64 = projection.explained_variance_ratio.iter().sum();
    assert_eq!(projection.explained_variance_ratio.len(), 5);
    assert!(projection.explained_variance_ratio.iter().all(|r| *r >= 0.0));
    assert!(total <= 1.0 + 1e-9, "total={total}");
}
