//! Immutable, id-indexed book catalog.
//!
//! Rows keep their insertion order for the lifetime of the value. Strategies
//! work on row indices and the dispatcher maps them back through
//! [`Catalog::get`], so the row order is part of the contract.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::book::Book;
use crate::error::{Error, Result};

/// Ordered collection of books with an `id -> row` lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    rows_by_id: HashMap<u64, usize>,
}

impl Catalog {
    /// Builds a catalog from records in row order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if two records share an id.
    pub fn new(books: Vec<Book>) -> Result<Self> {
        let mut rows_by_id = HashMap::with_capacity(books.len());
        for (row, book) in books.iter().enumerate() {
            if rows_by_id.insert(book.id, row).is_some() {
                return Err(Error::DuplicateId(book.id));
            }
        }
        Ok(Self { books, rows_by_id })
    }

    /// Loads a catalog from a JSON array of books.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let books: Vec<Book> = serde_json::from_reader(reader)?;
        tracing::info!(path = %path.display(), books = books.len(), "Catalog loaded");
        Self::new(books)
    }

    /// Writes the catalog as a JSON array, creating parent directories.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.books)?;
        tracing::info!(path = %path.display(), books = self.books.len(), "Catalog saved");
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns true if the catalog has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// All books in row order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Book at a row index.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Book> {
        self.books.get(row)
    }

    /// Row index of a book id.
    #[must_use]
    pub fn row_of(&self, id: u64) -> Option<usize> {
        self.rows_by_id.get(&id).copied()
    }

    /// Looks up a book by id.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<&Book> {
        self.row_of(id).and_then(|row| self.books.get(row))
    }
}
