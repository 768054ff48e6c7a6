//! Shared handler helpers.
//!
//! Keeps error responses consistent: every failure is a JSON
//! `{"error": "..."}` body with a status derived from the engine error.

use std::str::FromStr;

use axum::{http::StatusCode, Json};
use smartreads_core::Error;

use crate::types::ErrorResponse;

/// Handler error: status plus JSON body.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Builds an error response with a client-facing message.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// 500 response for failures the caller cannot fix.
///
/// The cause goes to the log; the body only names the step that failed.
pub fn internal_error(context: &str, err: &dyn std::fmt::Display) -> ApiError {
    tracing::error!(%context, cause = %err, "Request failed on the server side");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{context} failed"))
}

/// Maps an engine error to an HTTP response.
///
/// Request errors (missing book, unknown algorithm, bad parameter) keep their
/// message; anything else is reported as an internal error.
pub fn engine_error(context: &str, err: &Error) -> ApiError {
    match err {
        Error::ItemNotFound(_) => api_error(StatusCode::NOT_FOUND, err.to_string()),
        Error::UnknownAlgorithm(_) | Error::InvalidParameter(_) => {
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        _ => internal_error(context, err),
    }
}

/// Parses an optional query parameter, rejecting malformed values with 400.
pub fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid {name} parameter: {value}"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_status_mapping() {
        let (status, Json(body)) = engine_error("Recommend", &Error::ItemNotFound(7));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Book 7 not found");

        let (status, _) = engine_error("Recommend", &Error::UnknownAlgorithm("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = engine_error("Recommend", &Error::InvalidParameter("count".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = engine_error("Recommend", &Error::EmptyCatalog);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Recommend failed");
    }

    #[test]
    fn test_server_failure_body_names_step_only() {
        let cause = std::io::Error::other("worker thread died: /srv/secret/books.json");
        let (status, Json(body)) = internal_error("Evaluation task", &cause);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Evaluation task failed");
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param::<u64>("book_id", Some("42")).ok(), Some(Some(42)));
        assert_eq!(parse_param::<u64>("book_id", Some(" 42 ")).ok(), Some(Some(42)));
        assert_eq!(parse_param::<u64>("book_id", None).ok(), Some(None));
        assert_eq!(parse_param::<u64>("book_id", Some("")).ok(), Some(None));

        let (status, Json(body)) = parse_param::<u64>("book_id", Some("abc")).expect_err("bad");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid book_id parameter: abc");
        assert!(parse_param::<usize>("count", Some("-3")).is_err());
    }
}
