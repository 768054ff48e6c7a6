//! Tests for feature encoding.

use crate::book::{Book, Genre};
use crate::catalog::Catalog;
use crate::error::Error;
use crate::features::{encode, FeatureMatrix, DEGENERATE_YEAR_NORM};

fn catalog() -> Catalog {
    Catalog::new(vec![
        Book::new(1, Genre::Mystery, "Zebra", 1900, 1.0),
        Book::new(2, Genre::Fiction, "Acme", 2000, 5.0),
        Book::new(3, Genre::Fiction, "Zebra", 1950, 3.0),
    ])
    .expect("catalog")
}

#[test]
fn test_column_layout_sorted_categoricals_then_numerics() {
    let matrix = encode(&catalog()).expect("encode");
    assert_eq!(
        matrix.columns(),
        [
            "genre_Fiction",
            "genre_Mystery",
            "publisher_Acme",
            "publisher_Zebra",
            "year",
            "rating"
        ]
    );
    assert_eq!(matrix.rows(), 3);
    assert_eq!(matrix.cols(), 6);
}

#[test]
fn test_only_observed_categories_get_columns() {
    let matrix = encode(&catalog()).expect("encode");
    assert!(matrix.column_index("genre_Horror").is_none());
    assert!(matrix.column_index("genre_Mystery").is_some());
}

#[test]
fn test_rows_follow_catalog_order() {
    let matrix = encode(&catalog()).expect("encode");
    assert_eq!(matrix.row(0), [0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    assert_eq!(matrix.row(1), [1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
    assert_eq!(matrix.row(2), [1.0, 0.0, 0.0, 1.0, 0.5, 0.5]);
}

#[test]
fn test_single_year_falls_back_to_constant() {
    let catalog = Catalog::new(vec![
        Book::new(1, Genre::Fiction, "P", 2001, 2.0),
        Book::new(2, Genre::Horror, "P", 2001, 4.0),
    ])
    .expect("catalog");
    let matrix = encode(&catalog).expect("encode");
    let year = matrix.column_index("year").expect("year column");
    for row in matrix.iter_rows() {
        assert_eq!(row[year], DEGENERATE_YEAR_NORM);
        assert!(row.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_single_book_catalog_encodes() {
    let catalog = Catalog::new(vec![Book::new(1, Genre::Fiction, "P", 2001, 3.0)])
        .expect("catalog");
    let matrix = encode(&catalog).expect("encode");
    assert_eq!(matrix.rows(), 1);
    assert_eq!(matrix.row(0), [1.0, 1.0, DEGENERATE_YEAR_NORM, 0.5]);
}

#[test]
fn test_empty_catalog_fails() {
    let catalog = Catalog::new(Vec::new()).expect("catalog");
    assert!(matches!(encode(&catalog), Err(Error::EmptyCatalog)));
}

#[test]
fn test_encoding_is_bit_identical_across_calls() {
    let catalog = crate::synthetic::generate_catalog(200, 3).expect("catalog");
    let a = encode(&catalog).expect("encode");
    let b = encode(&catalog).expect("encode");
    assert_eq!(a.columns(), b.columns());
    let bits_a: Vec<u64> = a.as_slice().iter().map(|v| v.to_bits()).collect();
    let bits_b: Vec<u64> = b.as_slice().iter().map(|v| v.to_bits()).collect();
    assert_eq!(bits_a, bits_b);
}

#[test]
fn test_from_rows_checks_shape() {
    assert!(FeatureMatrix::from_rows(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_ok());
    assert!(matches!(
        FeatureMatrix::from_rows(2, 2, vec![1.0, 2.0, 3.0]),
        Err(Error::InvalidParameter(_))
    ));
    assert!(FeatureMatrix::from_rows(0, 0, Vec::new()).is_err());
}
