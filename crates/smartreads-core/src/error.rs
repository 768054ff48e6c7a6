//! Error types for the recommendation engine.

use thiserror::Error;

/// Engine error types.
///
/// Every variant is client-visible and non-retryable: the pipeline is a pure
/// function of an immutable catalog, so repeating a failed request with the
/// same inputs fails the same way.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog has no rows, so no feature matrix can be built.
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// The reference id is not present in the catalog.
    #[error("Book {0} not found")]
    ItemNotFound(u64),

    /// The algorithm name is outside `cosine`, `knn`, `matrix`, `cluster`.
    #[error("Invalid algorithm: {0}. Valid: cosine, knn, matrix, cluster")]
    UnknownAlgorithm(String),

    /// A numeric parameter is out of range (count, latent dimension, clusters).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two catalog records share the same id.
    #[error("Duplicate book id: {0}")]
    DuplicateId(u64),

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
