//! K-means partitioning of feature rows.
//!
//! Lloyd's algorithm with k-means++ seeding. The seed is fixed per
//! estimator, so fitting the same matrix twice gives the same partition.
//!
//! # Algorithm
//!
//! 1. Seed centroids with k-means++ (D² sampling)
//! 2. Assign each row to its nearest centroid (ties go to the lower cluster)
//! 3. Move each centroid to the mean of its rows; empty clusters stay put
//! 4. Repeat until centroid movement falls under the tolerance or
//!    `max_iter` is reached
//!
//! The whole procedure runs `n_init` times and keeps the lowest inertia.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::squared_euclidean;
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;

/// Default seed for k-means++ initialization.
pub const DEFAULT_SEED: u64 = 42;

/// K-means estimator.
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    n_clusters: usize,
    max_iter: usize,
    tol: f64,
    n_init: usize,
    seed: u64,
}

/// A fitted partition of the matrix rows.
#[derive(Debug, Clone)]
pub struct Partition {
    labels: Vec<usize>,
    centroids: Vec<Vec<f64>>,
    inertia: f64,
    n_iter: usize,
}

impl KMeans {
    /// Creates an estimator with `n_clusters` groups and default settings
    /// (300 iterations, tolerance `1e-4`, 3 restarts, seed 42).
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 300,
            tol: 1e-4,
            n_init: 3,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the iteration cap per restart.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Sets the relative convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the number of restarts.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// Sets the seed for k-means++ initialization.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Partitions the rows of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `n_clusters` is zero or larger
    /// than the number of rows.
    pub fn fit(&self, matrix: &FeatureMatrix) -> Result<Partition> {
        let n = matrix.rows();
        if self.n_clusters == 0 || self.n_clusters > n {
            return Err(Error::InvalidParameter(format!(
                "number of clusters {} must be between 1 and {n}",
                self.n_clusters
            )));
        }

        let threshold = self.tol * mean_column_variance(matrix);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<Partition> = None;

        for _ in 0..self.n_init {
            let centroids = plus_plus_init(matrix, self.n_clusters, &mut rng);
            let run = self.lloyd(matrix, centroids, threshold);
            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let best = best.ok_or_else(|| {
            Error::InvalidParameter("k-means needs at least one restart".to_string())
        })?;
        tracing::debug!(
            clusters = self.n_clusters,
            iterations = best.n_iter,
            inertia = best.inertia,
            "K-means fitted"
        );
        Ok(best)
    }

    fn lloyd(&self, matrix: &FeatureMatrix, mut centroids: Vec<Vec<f64>>, threshold: f64) -> Partition {
        let cols = matrix.cols();
        let mut labels = assign(matrix, &centroids);
        let mut n_iter = 0;

        for _ in 0..self.max_iter {
            n_iter += 1;
            let mut sums = vec![vec![0.0; cols]; centroids.len()];
            let mut counts = vec![0_usize; centroids.len()];
            for (row, &label) in matrix.iter_rows().zip(&labels) {
                counts[label] += 1;
                for (s, x) in sums[label].iter_mut().zip(row) {
                    *s += x;
                }
            }

            let mut shift = 0.0;
            for (c, centroid) in centroids.iter_mut().enumerate() {
                if counts[c] == 0 {
                    continue;
                }
                #[allow(clippy::cast_precision_loss)]
                let count = counts[c] as f64;
                let updated: Vec<f64> = sums[c].iter().map(|s| s / count).collect();
                shift += squared_euclidean(centroid, &updated);
                *centroid = updated;
            }

            let next = assign(matrix, &centroids);
            let stable = next == labels;
            labels = next;
            if stable || shift <= threshold {
                break;
            }
        }

        let inertia = matrix
            .iter_rows()
            .zip(&labels)
            .map(|(row, &label)| squared_euclidean(row, &centroids[label]))
            .sum();

        Partition {
            labels,
            centroids,
            inertia,
            n_iter,
        }
    }
}

impl Partition {
    /// Cluster label of every row, in row order.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Cluster of a row.
    #[must_use]
    pub fn cluster_of(&self, row: usize) -> Option<usize> {
        self.labels.get(row).copied()
    }

    /// Rows assigned to `cluster`, in row order.
    #[must_use]
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(row, _)| row)
            .collect()
    }

    /// Number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Centroid of a cluster.
    #[must_use]
    pub fn centroid(&self, cluster: usize) -> Option<&[f64]> {
        self.centroids.get(cluster).map(Vec::as_slice)
    }

    /// Sum of squared distances from rows to their centroid.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Lloyd iterations run by the winning restart.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }
}

/// Nearest centroid for every row; ties go to the lower cluster index.
fn assign(matrix: &FeatureMatrix, centroids: &[Vec<f64>]) -> Vec<usize> {
    matrix
        .iter_rows()
        .map(|row| {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (c, centroid) in centroids.iter().enumerate() {
                let dist = squared_euclidean(row, centroid);
                if dist < best_dist {
                    best = c;
                    best_dist = dist;
                }
            }
            best
        })
        .collect()
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn plus_plus_init(matrix: &FeatureMatrix, k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = matrix.rows();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(matrix.row(rng.gen_range(0..n)).to_vec());

    let mut closest: Vec<f64> = matrix
        .iter_rows()
        .map(|row| squared_euclidean(row, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();
        let pick = if total <= 0.0 {
            rng.gen_range(0..n)
        } else {
            let target = rng.gen::<f64>() * total;
            let mut acc = 0.0;
            closest
                .iter()
                .position(|&d| {
                    acc += d;
                    acc > target
                })
                .unwrap_or(n - 1)
        };

        let chosen = matrix.row(pick).to_vec();
        for (d, row) in closest.iter_mut().zip(matrix.iter_rows()) {
            *d = d.min(squared_euclidean(row, &chosen));
        }
        centroids.push(chosen);
    }
    centroids
}

fn mean_column_variance(matrix: &FeatureMatrix) -> f64 {
    let cols = matrix.cols();
    #[allow(clippy::cast_precision_loss)]
    let n = matrix.rows() as f64;
    let mut means = vec![0.0; cols];
    for row in matrix.iter_rows() {
        for (m, x) in means.iter_mut().zip(row) {
            *m += x / n;
        }
    }
    let mut variance = 0.0;
    for row in matrix.iter_rows() {
        for (m, x) in means.iter().zip(row) {
            variance += (x - m) * (x - m) / n;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = variance / cols as f64;
    mean
}
