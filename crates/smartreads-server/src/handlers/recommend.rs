//! Recommendation handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::types::{RecommendQuery, RecommendResponse};
use crate::AppState;

use super::helpers::{api_error, engine_error, internal_error, parse_param};

/// `GET /api/recommend?book_id=&algorithm=&count=`
///
/// `book_id` is required. `algorithm` and `count` fall back to the engine
/// defaults; counts above `engine.max_count` are rejected.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendQuery>,
) -> impl IntoResponse {
    let book_id = match parse_param::<u64>("book_id", query.book_id.as_deref()) {
        Ok(Some(id)) => id,
        Ok(None) => {
            return api_error(StatusCode::BAD_REQUEST, "Missing book_id parameter").into_response()
        }
        Err(e) => return e.into_response(),
    };

    let engine = state.recommender.engine();
    let count = match parse_param::<usize>("count", query.count.as_deref()) {
        Ok(count) => count.unwrap_or(engine.default_count),
        Err(e) => return e.into_response(),
    };
    if count > engine.max_count {
        return api_error(
            StatusCode::BAD_REQUEST,
            format!("count must not exceed {}", engine.max_count),
        )
        .into_response();
    }
    let algorithm = query
        .algorithm
        .unwrap_or_else(|| engine.default_algorithm.to_string());

    let result = tokio::task::spawn_blocking(move || {
        state.recommender.recommend(book_id, &algorithm, count)
    })
    .await;

    match result {
        Ok(Ok(books)) => Json::<RecommendResponse>(books).into_response(),
        Ok(Err(e)) => engine_error("Recommend", &e).into_response(),
        Err(e) => internal_error("Recommend task", &e).into_response(),
    }
}
