//! Catalog browsing handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::types::{BooksQuery, DEFAULT_PAGE_SIZE};
use crate::AppState;

use super::helpers::{api_error, parse_param};

/// Lists one page of books in catalog order.
///
/// Pages are 1-based; a page past the end yields an empty array.
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BooksQuery>,
) -> impl IntoResponse {
    let page = match parse_param::<usize>("page", query.page.as_deref()) {
        Ok(page) => page.unwrap_or(1),
        Err(e) => return e.into_response(),
    };
    let limit = match parse_param::<usize>("limit", query.limit.as_deref()) {
        Ok(limit) => limit.unwrap_or(DEFAULT_PAGE_SIZE),
        Err(e) => return e.into_response(),
    };
    if page == 0 || limit == 0 {
        return api_error(
            StatusCode::BAD_REQUEST,
            "page and limit must be positive integers",
        )
        .into_response();
    }

    let books = state.recommender.catalog().books();
    let start = (page - 1).saturating_mul(limit).min(books.len());
    let end = start.saturating_add(limit).min(books.len());
    Json(&books[start..end]).into_response()
}

/// Returns one book by id.
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.recommender.catalog().find(id) {
        Some(book) => Json(book).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "Book not found").into_response(),
    }
}
