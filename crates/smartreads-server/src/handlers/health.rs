//! Service description and health check.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::types::{HealthResponse, ServiceInfo};
use crate::AppState;

/// Describes the service and lists its endpoints.
pub async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo {
        message: "SmartReads Book Recommendation API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "/health",
            "/api/books?page=<page>&limit=<limit>",
            "/api/book/<book_id>",
            "/api/recommend?book_id=<book_id>&algorithm=<algorithm>&count=<count>",
            "/api/dataset/stats",
            "/api/algorithms",
            "/api/algorithms/performance",
        ],
    })
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_books: state.recommender.catalog().len(),
    })
}
