//! Book records and the fixed genre enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genre of a book. The set is closed: catalogs cannot introduce new genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    /// Fiction
    Fiction,
    /// Non-Fiction
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    /// Mystery
    Mystery,
    /// Science Fiction
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    /// Fantasy
    Fantasy,
    /// Romance
    Romance,
    /// Thriller
    Thriller,
    /// Horror
    Horror,
    /// Biography
    Biography,
}

impl Genre {
    /// All genres in declaration order.
    pub const ALL: [Genre; 9] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Thriller,
        Genre::Horror,
        Genre::Biography,
    ];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Biography => "Biography",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| format!("unknown genre '{s}'"))
    }
}

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier (primary key).
    pub id: u64,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Publication year
    pub year: i32,
    /// Publisher
    pub publisher: String,
    /// Genre
    pub genre: Genre,
    /// Average rating in `[1.0, 5.0]`.
    pub rating: f64,
    /// Page count
    pub pages: u32,
    /// Language
    pub language: String,
    /// Free-text description
    pub description: String,
}

impl Book {
    /// Creates a book with the attributes the feature encoder reads.
    ///
    /// Remaining text fields are derived from the id; useful for fixtures.
    #[must_use]
    pub fn new(id: u64, genre: Genre, publisher: &str, year: i32, rating: f64) -> Self {
        Self {
            id,
            title: format!("Book Title {id}"),
            author: format!("Author {}", id % 100),
            year,
            publisher: publisher.to_string(),
            genre,
            rating,
            pages: 300,
            language: "English".to_string(),
            description: format!("Description for book {id}..."),
        }
    }
}
