//! Request and response types for the REST API.

use serde::{Deserialize, Serialize};
use smartreads_core::{Algorithm, Book};

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Service description returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub message: &'static str,
    /// Server version.
    pub version: &'static str,
    /// Available endpoints.
    pub endpoints: Vec<&'static str>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the server answers.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Number of books in the catalog.
    pub total_books: usize,
}

/// Pagination for `GET /api/books`.
///
/// Values arrive as strings so malformed numbers get a JSON 400 instead of
/// the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct BooksQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 20).
    pub limit: Option<String>,
}

/// Default page size for `GET /api/books`.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Query for `GET /api/recommend`.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    /// Reference book id (required).
    pub book_id: Option<String>,
    /// Algorithm name; engine default when absent.
    pub algorithm: Option<String>,
    /// List length; engine default when absent.
    pub count: Option<String>,
}

/// One entry of `GET /api/algorithms`.
#[derive(Debug, Serialize)]
pub struct AlgorithmInfo {
    /// Wire name.
    pub name: Algorithm,
    /// What it does.
    pub description: &'static str,
    /// Whether repeated requests return identical lists.
    pub deterministic: bool,
}

/// Response for `GET /api/algorithms`.
#[derive(Debug, Serialize)]
pub struct AlgorithmsResponse {
    /// All algorithms.
    pub algorithms: Vec<AlgorithmInfo>,
    /// Used when a request names none.
    pub default: Algorithm,
}

/// Query for `GET /api/algorithms/performance`.
#[derive(Debug, Default, Deserialize)]
pub struct PerformanceQuery {
    /// Number of query books.
    pub sample_size: Option<String>,
    /// List length per query.
    pub k: Option<String>,
    /// Sampling seed.
    pub seed: Option<String>,
}

/// Largest sample the performance endpoint accepts.
pub const MAX_EVALUATION_SAMPLE: usize = 500;

/// Recommendation list; serialized as a bare array of books.
pub type RecommendResponse = Vec<Book>;
