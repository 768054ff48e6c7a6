//! Ranking quality and latency metrics for recommendation lists.
//!
//! Recommendation lists are judged position by position: each returned book
//! is either relevant to the reference book or not.
//! - **Precision@k**: share of relevant books among the first k
//! - **Reciprocal rank**: `1 / rank` of the first relevant book
//! - **NDCG@k**: position-discounted gain normalized by the ideal ordering
//! - **Hit rate**: share of lists with at least one relevant book in the first k
//! - **Latency percentiles**: p50, p95, p99 over request durations

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Precision@k over a relevance list.
///
/// Returns 0.0 when `k` is zero or the list is empty. Lists shorter than `k`
/// are judged on what they contain.
#[must_use]
pub fn precision_at_k(relevant: &[bool], k: usize) -> f64 {
    let considered = &relevant[..k.min(relevant.len())];
    if considered.is_empty() {
        return 0.0;
    }
    let hits = considered.iter().filter(|&&r| r).count();

    #[allow(clippy::cast_precision_loss)]
    let precision = hits as f64 / considered.len() as f64;
    precision
}

/// Reciprocal rank of the first relevant position, 0.0 if none.
#[must_use]
pub fn reciprocal_rank(relevant: &[bool]) -> f64 {
    relevant.iter().position(|&r| r).map_or(0.0, |rank| {
        #[allow(clippy::cast_precision_loss)]
        let rr = 1.0 / (rank + 1) as f64;
        rr
    })
}

/// NDCG@k (Normalized Discounted Cumulative Gain).
///
/// # Formula
///
/// `DCG@k = Σ (2^rel_i - 1) / log2(i + 2)` for i in 0..k
/// `NDCG@k = DCG@k / IDCG@k` where IDCG is DCG of the ideal ordering
#[must_use]
pub fn ndcg_at_k(relevances: &[f64], k: usize) -> f64 {
    if relevances.is_empty() {
        return 0.0;
    }
    let k = k.min(relevances.len());

    let dcg = discounted_gain(relevances.iter().take(k));

    let mut ideal = relevances.to_vec();
    ideal.sort_by(|a, b| b.total_cmp(a));
    let idcg = discounted_gain(ideal.iter().take(k));

    if idcg <= 0.0 {
        return 0.0;
    }
    dcg / idcg
}

fn discounted_gain<'a>(relevances: impl Iterator<Item = &'a f64>) -> f64 {
    relevances
        .enumerate()
        .map(|(i, &rel)| {
            let gain = 2.0_f64.powf(rel) - 1.0;
            #[allow(clippy::cast_precision_loss)]
            let discount = (i as f64 + 2.0).log2();
            gain / discount
        })
        .sum()
}

/// Share of lists with at least one relevant entry in the first `k`.
#[must_use]
pub fn hit_rate(lists: &[Vec<bool>], k: usize) -> f64 {
    if lists.is_empty() {
        return 0.0;
    }
    let hits = lists
        .iter()
        .filter(|list| list.iter().take(k).any(|&r| r))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let hr = hits as f64 / lists.len() as f64;
    hr
}

/// Latency percentiles over a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatencyStats {
    /// Minimum latency observed
    pub min: Duration,
    /// Maximum latency observed
    pub max: Duration,
    /// Mean latency
    pub mean: Duration,
    /// 50th percentile (median)
    pub p50: Duration,
    /// 95th percentile
    pub p95: Duration,
    /// 99th percentile
    pub p99: Duration,
}

/// [`LatencyStats`] in fractional milliseconds, for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyMillis {
    /// Mean
    pub mean: f64,
    /// Median
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Maximum
    pub max: f64,
}

impl LatencyStats {
    /// Converts to milliseconds.
    #[must_use]
    pub fn as_millis(&self) -> LatencyMillis {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        LatencyMillis {
            mean: ms(self.mean),
            p50: ms(self.p50),
            p95: ms(self.p95),
            p99: ms(self.p99),
            max: ms(self.max),
        }
    }
}

/// Computes min, max, mean, p50, p95 and p99 from duration samples.
#[must_use]
pub fn compute_latency_percentiles(samples: &[Duration]) -> LatencyStats {
    if samples.is_empty() {
        return LatencyStats::default();
    }

    let mut sorted = samples.to_vec();
    sorted.sort();
    let n = sorted.len();
    let sum: Duration = sorted.iter().sum();

    // The mean cannot exceed the maximum sample, which fits in u64 nanoseconds.
    #[allow(clippy::cast_possible_truncation)]
    let mean = Duration::from_nanos((sum.as_nanos() / n as u128) as u64);

    LatencyStats {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        p50: percentile(&sorted, 50),
        p95: percentile(&sorted, 95),
        p99: percentile(&sorted, 99),
    }
}

/// Nearest-rank percentile of a sorted, non-empty slice.
fn percentile(sorted: &[Duration], p: usize) -> Duration {
    let n = sorted.len();
    // p in [0, 100] keeps the rounded index in [0, n - 1].
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let idx = ((p as f64 / 100.0) * (n - 1) as f64).round() as usize;
    sorted[idx.min(n - 1)]
}
