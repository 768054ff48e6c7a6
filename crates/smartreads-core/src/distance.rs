//! Distance and similarity kernels over feature rows.
//!
//! Provides a trait abstraction so the neighbour index does not hard-code a
//! metric:
//! - `Cosine`: `1 - cosine_similarity`
//! - `Euclidean`: L2 distance

use serde::{Deserialize, Serialize};

/// Metric used to compare two feature rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Angle between rows, magnitude-insensitive.
    Cosine,
    /// Straight-line distance.
    #[default]
    Euclidean,
}

/// Trait for distance computation engines.
pub trait DistanceEngine: Send + Sync {
    /// Computes distance between two rows. Lower is closer.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Distance from one query to many candidates, in candidate order.
    fn batch_distance<'a, I>(&self, query: &[f64], candidates: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a [f64]>,
        Self: Sized,
    {
        candidates
            .into_iter()
            .map(|c| self.distance(query, c))
            .collect()
    }

    /// Returns the metric type for this engine.
    fn metric(&self) -> DistanceMetric;
}

/// Scalar CPU distance computation.
#[derive(Debug, Clone, Copy)]
pub struct CpuDistance {
    metric: DistanceMetric,
}

impl CpuDistance {
    /// Creates a new CPU distance engine with the given metric.
    #[must_use]
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }
}

impl DistanceEngine for CpuDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self.metric {
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
            DistanceMetric::Euclidean => euclidean_distance(a, b),
        }
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }
}

/// Dot product of two equal-length rows.
#[inline]
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// L2 norm of a row.
#[inline]
#[must_use]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Cosine similarity in `[-1, 1]`.
///
/// A zero-norm row has no direction; its similarity to anything is `0.0`.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denom = norm(a) * norm(b);
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0)
}

/// Squared Euclidean distance.
#[inline]
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance.
#[inline]
#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}
