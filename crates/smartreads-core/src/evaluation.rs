//! Offline comparison of the four strategies on the live catalog.
//!
//! A seeded sample of books is used as queries. A recommended book counts as
//! relevant when it shares the query book's genre. Each strategy is scored
//! on precision@k, hit rate, MRR and NDCG@k, and timed per query.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::{
    compute_latency_percentiles, hit_rate, ndcg_at_k, precision_at_k, reciprocal_rank,
    LatencyMillis,
};
use crate::recommender::Recommender;
use crate::strategy::Algorithm;

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Number of query books (capped at the catalog size).
    pub sample_size: usize,
    /// List length per query.
    pub k: usize,
    /// Seed for query sampling and cluster backfill.
    pub seed: u64,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            sample_size: 50,
            k: 5,
            seed: 42,
        }
    }
}

/// Scores for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmReport {
    /// Strategy evaluated.
    pub algorithm: Algorithm,
    /// What the strategy does.
    pub description: String,
    /// Whether repeated requests return identical lists.
    pub deterministic: bool,
    /// Queries that produced a list.
    pub queries: usize,
    /// Mean precision@k.
    pub precision_at_k: f64,
    /// Share of queries with a same-genre book in the list.
    pub hit_rate: f64,
    /// Mean reciprocal rank of the first same-genre book.
    pub mrr: f64,
    /// Mean NDCG@k.
    pub ndcg_at_k: f64,
    /// Per-query latency.
    pub latency_ms: LatencyMillis,
    /// Set when the strategy cannot run on this catalog.
    pub error: Option<String>,
}

/// Evaluates every strategy in [`Algorithm::ALL`] order.
///
/// # Errors
///
/// Returns [`Error::EmptyCatalog`] for an empty catalog and
/// [`Error::InvalidParameter`] if `k` is zero. A strategy that cannot run
/// on this catalog (e.g. too few rows for the latent dimension) is reported
/// with `error` set instead of failing the whole evaluation.
pub fn evaluate(recommender: &Recommender, options: EvaluationOptions) -> Result<Vec<AlgorithmReport>> {
    let catalog = recommender.catalog();
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    if options.k == 0 {
        return Err(Error::InvalidParameter("k must be at least 1".to_string()));
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let amount = options.sample_size.clamp(1, catalog.len());
    let mut queries = rand::seq::index::sample(&mut rng, catalog.len(), amount).into_vec();
    queries.sort_unstable();

    // Encode once up front so the first strategy's latency excludes encoding.
    recommender.features()?;

    Ok(Algorithm::ALL
        .into_iter()
        .map(|algorithm| evaluate_one(recommender, algorithm, &queries, options))
        .collect())
}

fn evaluate_one(
    recommender: &Recommender,
    algorithm: Algorithm,
    queries: &[usize],
    options: EvaluationOptions,
) -> AlgorithmReport {
    let catalog = recommender.catalog();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut lists: Vec<Vec<bool>> = Vec::with_capacity(queries.len());
    let mut latencies: Vec<Duration> = Vec::with_capacity(queries.len());
    let mut error = None;

    for &reference in queries {
        let start = Instant::now();
        let rows = match recommender.rank_rows(reference, algorithm, options.k, &mut rng) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(%algorithm, error = %e, "Strategy skipped during evaluation");
                error = Some(e.to_string());
                break;
            }
        };
        latencies.push(start.elapsed());

        let genre = catalog.get(reference).map(|b| b.genre);
        lists.push(
            rows.iter()
                .map(|&row| catalog.get(row).map(|b| b.genre) == genre)
                .collect(),
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let n = lists.len().max(1) as f64;
    let mean = |f: &dyn Fn(&Vec<bool>) -> f64| lists.iter().map(f).sum::<f64>() / n;

    let precision = mean(&|l| precision_at_k(l, options.k));
    let mrr = mean(&|l| reciprocal_rank(l));
    let ndcg = mean(&|l| {
        let gains: Vec<f64> = l.iter().map(|&r| if r { 1.0 } else { 0.0 }).collect();
        ndcg_at_k(&gains, options.k)
    });

    AlgorithmReport {
        algorithm,
        description: algorithm.description().to_string(),
        deterministic: algorithm.is_deterministic(),
        queries: lists.len(),
        precision_at_k: precision,
        hit_rate: hit_rate(&lists, options.k),
        mrr,
        ndcg_at_k: ndcg,
        latency_ms: compute_latency_percentiles(&latencies).as_millis(),
        error,
    }
}
