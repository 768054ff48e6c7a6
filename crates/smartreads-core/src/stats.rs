//! Descriptive statistics over a catalog.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Read-only summary of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Number of books.
    pub total_books: usize,
    /// Mean rating, `0.0` for an empty catalog.
    pub average_rating: f64,
    /// Books per genre label.
    pub genres: BTreeMap<String, usize>,
    /// Books per language.
    pub languages: BTreeMap<String, usize>,
    /// `[min, max]` publication year, absent for an empty catalog.
    pub years_range: Option<[i32; 2]>,
    /// `[min, max]` page count, absent for an empty catalog.
    pub pages_range: Option<[u32; 2]>,
    /// Distinct publishers.
    pub publishers: usize,
    /// Distinct authors.
    pub authors: usize,
}

impl CatalogStats {
    /// Computes statistics in one pass over the catalog.
    #[must_use]
    pub fn compute(catalog: &Catalog) -> Self {
        let books = catalog.books();
        let mut genres = BTreeMap::new();
        let mut languages = BTreeMap::new();
        let mut publishers = HashSet::new();
        let mut authors = HashSet::new();
        let mut rating_sum = 0.0;
        let mut years: Option<[i32; 2]> = None;
        let mut pages: Option<[u32; 2]> = None;

        for book in books {
            *genres.entry(book.genre.label().to_string()).or_insert(0) += 1;
            *languages.entry(book.language.clone()).or_insert(0) += 1;
            publishers.insert(book.publisher.as_str());
            authors.insert(book.author.as_str());
            rating_sum += book.rating;
            years = Some(years.map_or([book.year, book.year], |[lo, hi]| {
                [lo.min(book.year), hi.max(book.year)]
            }));
            pages = Some(pages.map_or([book.pages, book.pages], |[lo, hi]| {
                [lo.min(book.pages), hi.max(book.pages)]
            }));
        }

        #[allow(clippy::cast_precision_loss)]
        let average_rating = if books.is_empty() {
            0.0
        } else {
            rating_sum / books.len() as f64
        };

        Self {
            total_books: books.len(),
            average_rating,
            genres,
            languages,
            years_range: years,
            pages_range: pages,
            publishers: publishers.len(),
            authors: authors.len(),
        }
    }
}
