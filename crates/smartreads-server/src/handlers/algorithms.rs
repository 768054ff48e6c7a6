//! Algorithm listing and live performance evaluation.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use smartreads_core::{evaluate, Algorithm, EvaluationOptions};

use crate::types::{AlgorithmInfo, AlgorithmsResponse, PerformanceQuery, MAX_EVALUATION_SAMPLE};
use crate::AppState;

use super::helpers::{api_error, engine_error, internal_error, parse_param, ApiError};

/// `GET /api/algorithms`
pub async fn list_algorithms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(AlgorithmsResponse {
        algorithms: Algorithm::ALL
            .into_iter()
            .map(|algorithm| AlgorithmInfo {
                name: algorithm,
                description: algorithm.description(),
                deterministic: algorithm.is_deterministic(),
            })
            .collect(),
        default: state.recommender.engine().default_algorithm,
    })
}

/// `GET /api/algorithms/performance?sample_size=&k=&seed=`
///
/// Evaluates every algorithm on the live catalog. Relevance is "same genre
/// as the query book"; see [`smartreads_core::evaluation`].
pub async fn algorithm_performance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PerformanceQuery>,
) -> impl IntoResponse {
    let options = match performance_options(state.evaluation, &query) {
        Ok(options) => options,
        Err(e) => return e.into_response(),
    };

    let result =
        tokio::task::spawn_blocking(move || evaluate(&state.recommender, options)).await;

    match result {
        Ok(Ok(reports)) => Json(reports).into_response(),
        Ok(Err(e)) => engine_error("Evaluation", &e).into_response(),
        Err(e) => internal_error("Evaluation task", &e).into_response(),
    }
}

fn performance_options(
    defaults: EvaluationOptions,
    query: &PerformanceQuery,
) -> Result<EvaluationOptions, ApiError> {
    let sample_size = parse_param::<usize>("sample_size", query.sample_size.as_deref())?
        .unwrap_or(defaults.sample_size);
    if sample_size == 0 || sample_size > MAX_EVALUATION_SAMPLE {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("sample_size must be between 1 and {MAX_EVALUATION_SAMPLE}"),
        ));
    }
    Ok(EvaluationOptions {
        sample_size,
        k: parse_param::<usize>("k", query.k.as_deref())?.unwrap_or(defaults.k),
        seed: parse_param::<u64>("seed", query.seed.as_deref())?.unwrap_or(defaults.seed),
    })
}
