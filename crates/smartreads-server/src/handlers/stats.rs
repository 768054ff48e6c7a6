//! Catalog statistics handler.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use smartreads_core::CatalogStats;

use crate::AppState;

/// `GET /api/dataset/stats`
pub async fn dataset_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(CatalogStats::compute(state.recommender.catalog()))
}
