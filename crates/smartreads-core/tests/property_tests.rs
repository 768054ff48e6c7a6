//! Property tests for the recommendation invariants over random catalogs.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smartreads_core::{
    dispatch, dispatch_with, encode, euclidean_distance, Book, Catalog, EngineConfig, Genre,
};

const PUBLISHERS: [&str; 4] = ["Penguin", "Tor", "Vintage", "Orbit"];

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    let row = (
        0..Genre::ALL.len(),
        0..PUBLISHERS.len(),
        1950..2020_i32,
        10..=50_u32,
    );
    prop::collection::vec(row, 2..40).prop_map(|rows| {
        let books = rows
            .into_iter()
            .zip(1_u64..)
            .map(|((genre, publisher, year, rating), id)| {
                Book::new(
                    id,
                    Genre::ALL[genre],
                    PUBLISHERS[publisher],
                    year,
                    f64::from(rating) / 10.0,
                )
            })
            .collect();
        Catalog::new(books).expect("ids are unique")
    })
}

fn small_engine(rows: usize) -> EngineConfig {
    EngineConfig {
        latent_dim: 1,
        num_clusters: rows.min(3),
        n_init: 1,
        ..EngineConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_results_exclude_reference_and_respect_count(
        catalog in catalog_strategy(),
        pick in any::<prop::sample::Index>(),
        count in 1_usize..50,
        seed in any::<u64>(),
    ) {
        let reference = catalog.books()[pick.index(catalog.len())].id;
        let engine = small_engine(catalog.len());
        for algorithm in ["cosine", "knn", "matrix", "cluster"] {
            let books = dispatch_with(
                &catalog,
                &engine,
                reference,
                algorithm,
                count,
                &mut StdRng::seed_from_u64(seed),
            )
            .expect("recommend");
            prop_assert!(books.len() <= count);
            prop_assert_eq!(books.len(), count.min(catalog.len() - 1));
            prop_assert!(books.iter().all(|b| b.id != reference));
            let unique: HashSet<u64> = books.iter().map(|b| b.id).collect();
            prop_assert_eq!(unique.len(), books.len());
        }
    }

    #[test]
    fn prop_knn_distances_ascend(
        catalog in catalog_strategy(),
        pick in any::<prop::sample::Index>(),
        count in 1_usize..20,
    ) {
        let reference = catalog.books()[pick.index(catalog.len())].id;
        let matrix = encode(&catalog).expect("encode");
        let origin = matrix.row(catalog.row_of(reference).expect("row"));
        let books = dispatch(&catalog, reference, "knn", count).expect("knn");
        let distances: Vec<f64> = books
            .iter()
            .map(|b| euclidean_distance(origin, matrix.row(catalog.row_of(b.id).expect("row"))))
            .collect();
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_deterministic_algorithms_repeat(
        catalog in catalog_strategy(),
        pick in any::<prop::sample::Index>(),
        count in 1_usize..10,
    ) {
        let reference = catalog.books()[pick.index(catalog.len())].id;
        let engine = small_engine(catalog.len());
        for algorithm in ["cosine", "knn", "matrix"] {
            let mut rng = rand::thread_rng();
            let first = dispatch_with(&catalog, &engine, reference, algorithm, count, &mut rng)
                .expect("first");
            let second = dispatch_with(&catalog, &engine, reference, algorithm, count, &mut rng)
                .expect("second");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn prop_encoded_values_in_unit_interval(catalog in catalog_strategy()) {
        let matrix = encode(&catalog).expect("encode");
        prop_assert_eq!(matrix.rows(), catalog.len());
        prop_assert!(matrix.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        for row in matrix.iter_rows() {
            let genre_hot = matrix
                .columns()
                .iter()
                .zip(row)
                .filter(|(name, v)| name.starts_with("genre_") && **v == 1.0)
                .count();
            prop_assert_eq!(genre_hot, 1);
        }
    }
}
