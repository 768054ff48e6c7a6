//! Synthetic catalog generation for demos and fixtures.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::book::{Book, Genre};
use crate::catalog::Catalog;
use crate::error::Result;

const LANGUAGES: &[&str] = &["English", "Spanish", "French", "German", "Chinese"];

/// Generates `count` books with ids `1..=count` from a seeded generator.
///
/// Authors cycle through 100 names and publishers through 20, so the
/// publisher one-hot block stays small and clusters have something to find.
#[must_use]
pub fn generate_books(count: usize, seed: u64) -> Vec<Book> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count as u64)
        .map(|id| {
            let genre = *Genre::ALL.choose(&mut rng).unwrap_or(&Genre::Fiction);
            let language = LANGUAGES.choose(&mut rng).copied().unwrap_or("English");
            let rating = (rng.gen_range(1.0_f64..5.0) * 10.0).round() / 10.0;
            Book {
                id,
                title: format!("Book Title {id}"),
                author: format!("Author {}", id % 100),
                year: rng.gen_range(1900..2023),
                publisher: format!("Publisher {}", id % 20),
                genre,
                rating,
                pages: rng.gen_range(100..800),
                language: language.to_string(),
                description: format!("Description for book {id}..."),
            }
        })
        .collect()
}

/// Generates a synthetic catalog.
pub fn generate_catalog(count: usize, seed: u64) -> Result<Catalog> {
    tracing::info!(count, seed, "Generating synthetic catalog");
    Catalog::new(generate_books(count, seed))
}
