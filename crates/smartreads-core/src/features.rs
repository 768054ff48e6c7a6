//! Feature encoding: catalog rows to a dense numeric matrix.
//!
//! Column layout:
//! - one indicator column per distinct genre present, sorted by label
//! - one indicator column per distinct publisher present, sorted
//! - `year`, min-max normalized over the catalog
//! - `rating`, mapped from `[1, 5]` to `[0, 1]`
//!
//! The column set depends only on the values observed in the catalog and is
//! recomputed on every call.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Normalized year used for every row when all books share one year.
pub const DEGENERATE_YEAR_NORM: f64 = 0.5;

/// Dense row-major feature matrix, one row per catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    columns: Vec<String>,
}

impl FeatureMatrix {
    /// Builds a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `cols == 0` or
    /// `data.len() != rows * cols`.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if cols == 0 {
            return Err(Error::InvalidParameter(
                "matrix needs at least one column".to_string(),
            ));
        }
        if data.len() != rows * cols {
            return Err(Error::InvalidParameter(format!(
                "matrix data has {} values, expected {rows}x{cols}",
                data.len()
            )));
        }
        let columns = (0..cols).map(|c| format!("f{c}")).collect();
        Ok(Self {
            rows,
            cols,
            data,
            columns,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column names in column order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterates over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Raw row-major values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Index of a named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Encodes a catalog into a [`FeatureMatrix`].
///
/// Pure and deterministic: the same catalog always yields a bit-identical
/// matrix.
///
/// # Errors
///
/// Returns [`Error::EmptyCatalog`] if the catalog has no rows.
pub fn encode(catalog: &Catalog) -> Result<FeatureMatrix> {
    let books = catalog.books();
    if books.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let genres: BTreeSet<&str> = books.iter().map(|b| b.genre.label()).collect();
    let publishers: BTreeSet<&str> = books.iter().map(|b| b.publisher.as_str()).collect();
    let genre_cols: BTreeMap<&str, usize> = genres
        .iter()
        .enumerate()
        .map(|(i, g)| (*g, i))
        .collect();
    let publisher_offset = genre_cols.len();
    let publisher_cols: BTreeMap<&str, usize> = publishers
        .iter()
        .enumerate()
        .map(|(i, p)| (*p, publisher_offset + i))
        .collect();
    let year_col = publisher_offset + publisher_cols.len();
    let rating_col = year_col + 1;
    let cols = rating_col + 1;

    let (min_year, max_year) = books
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), b| (lo.min(b.year), hi.max(b.year)));
    let degenerate_years = min_year == max_year;
    let year_span = f64::from(max_year) - f64::from(min_year);
    if degenerate_years {
        tracing::warn!(
            year = min_year,
            "All books share one publication year; normalized year fixed at {}",
            DEGENERATE_YEAR_NORM
        );
    }

    let mut data = vec![0.0; books.len() * cols];
    for (row, book) in books.iter().enumerate() {
        let base = row * cols;
        data[base + genre_cols[book.genre.label()]] = 1.0;
        data[base + publisher_cols[book.publisher.as_str()]] = 1.0;
        data[base + year_col] = if degenerate_years {
            DEGENERATE_YEAR_NORM
        } else {
            (f64::from(book.year) - f64::from(min_year)) / year_span
        };
        data[base + rating_col] = (book.rating - 1.0) / 4.0;
    }

    let mut columns = Vec::with_capacity(cols);
    columns.extend(genres.iter().map(|g| format!("genre_{g}")));
    columns.extend(publishers.iter().map(|p| format!("publisher_{p}")));
    columns.push("year".to_string());
    columns.push("rating".to_string());

    Ok(FeatureMatrix {
        rows: books.len(),
        cols,
        data,
        columns,
    })
}
