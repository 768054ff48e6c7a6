//! SmartReads Server - REST API for content-based book recommendations.
//!
//! The router is built here so integration tests can drive it without
//! binding a socket; `main.rs` only adds configuration, CORS and tracing.

use std::sync::Arc;

use axum::{routing::get, Router};
use smartreads_core::{EvaluationOptions, Recommender};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod handlers;
pub mod types;

pub use handlers::{
    algorithm_performance, dataset_stats, get_book, health_check, list_algorithms, list_books,
    recommend, service_info,
};

/// Shared state handed to every handler.
pub struct AppState {
    /// Catalog plus engine parameters.
    pub recommender: Recommender,
    /// Defaults for `/api/algorithms/performance`.
    pub evaluation: EvaluationOptions,
}

impl AppState {
    /// Wraps a recommender with default evaluation settings.
    #[must_use]
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender,
            evaluation: EvaluationOptions::default(),
        }
    }
}

/// Builds the application router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/api/books", get(list_books))
        .route("/api/book/{id}", get(get_book))
        .route("/api/recommend", get(recommend))
        .route("/api/dataset/stats", get(dataset_stats))
        .route("/api/algorithms", get(list_algorithms))
        .route("/api/algorithms/performance", get(algorithm_performance))
        .with_state(state)
}

/// Builds the CORS layer: restricted to `origins` when any are given,
/// permissive otherwise.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origin_list: Vec<_> = origins
        .iter()
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    if origin_list.is_empty() {
        tracing::warn!(
            "CORS: permissive (dev mode). Set SMARTREADS_CORS_ORIGIN to restrict origins."
        );
        return CorsLayer::permissive();
    }
    tracing::info!("CORS: restricted to {} origin(s)", origin_list.len());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origin_list))
        .allow_methods(Any)
        .allow_headers(Any)
}
