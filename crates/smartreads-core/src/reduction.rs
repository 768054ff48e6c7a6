//! Truncated SVD: linear projection of feature rows into a latent space.
//!
//! The decomposition goes through the smaller of the two Gram matrices
//! (`XᵀX` when columns ≤ rows, `XXᵀ` otherwise) and diagonalizes it with the
//! cyclic Jacobi method. No random start is involved, so fitting the same
//! matrix twice yields the same projection.
//!
//! Projected rows are `U·Σ` (equivalently `X·V`), matching the usual
//! `fit_transform` convention. Each component's sign is fixed so that its
//! largest-magnitude loading is positive.

use crate::distance::dot;
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;

const MAX_SWEEPS: usize = 100;
const CONVERGENCE_RATIO: f64 = 1e-24;

/// Truncated SVD estimator.
#[derive(Debug, Clone, Copy)]
pub struct TruncatedSvd {
    n_components: usize,
}

/// Result of [`TruncatedSvd::fit_transform`].
#[derive(Debug, Clone)]
pub struct LatentProjection {
    /// Projected rows, `rows x n_components`.
    pub embedding: FeatureMatrix,
    /// Singular values in descending order.
    pub singular_values: Vec<f64>,
    /// Share of total feature variance captured by each component.
    pub explained_variance_ratio: Vec<f64>,
}

impl TruncatedSvd {
    /// Creates an estimator keeping `n_components` latent dimensions.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self { n_components }
    }

    /// Number of latent dimensions kept.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Largest valid component count for a `rows x cols` matrix.
    #[must_use]
    pub fn max_components(rows: usize, cols: usize) -> usize {
        rows.min(cols).saturating_sub(1)
    }

    /// Fits on `matrix` and returns the projected rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `n_components` is zero or
    /// exceeds `min(rows, cols) - 1`.
    pub fn fit_transform(&self, matrix: &FeatureMatrix) -> Result<LatentProjection> {
        let (n, d) = (matrix.rows(), matrix.cols());
        let k = self.n_components;
        let max = Self::max_components(n, d);
        if k == 0 || k > max {
            return Err(Error::InvalidParameter(format!(
                "latent dimension {k} must be between 1 and {max} for a {n}x{d} feature matrix"
            )));
        }

        let mut embedding = vec![0.0; n * k];
        let mut singular_values = Vec::with_capacity(k);

        if d <= n {
            let (values, vectors) = symmetric_eigen(column_gram(matrix), d);
            for (j, &(lambda, col)) in top_pairs(&values, k).iter().enumerate() {
                let mut v: Vec<f64> = (0..d).map(|r| vectors[r * d + col]).collect();
                orient(&mut v);
                for (i, row) in matrix.iter_rows().enumerate() {
                    embedding[i * k + j] = dot(row, &v);
                }
                singular_values.push(lambda.max(0.0).sqrt());
            }
        } else {
            let (values, vectors) = symmetric_eigen(row_gram(matrix), n);
            for (j, &(lambda, col)) in top_pairs(&values, k).iter().enumerate() {
                let sigma = lambda.max(0.0).sqrt();
                let mut u: Vec<f64> = (0..n).map(|r| vectors[r * n + col]).collect();
                orient(&mut u);
                for (i, value) in u.iter().enumerate() {
                    embedding[i * k + j] = value * sigma;
                }
                singular_values.push(sigma);
            }
        }

        let embedding = FeatureMatrix::from_rows(n, k, embedding)?;
        let explained_variance_ratio = variance_ratio(matrix, &embedding);
        tracing::debug!(
            rows = n,
            cols = d,
            components = k,
            "Truncated SVD fitted"
        );

        Ok(LatentProjection {
            embedding,
            singular_values,
            explained_variance_ratio,
        })
    }
}

/// `XᵀX`, `cols x cols`.
fn column_gram(matrix: &FeatureMatrix) -> Vec<f64> {
    let d = matrix.cols();
    let mut gram = vec![0.0; d * d];
    for row in matrix.iter_rows() {
        for p in 0..d {
            if row[p] == 0.0 {
                continue;
            }
            for q in p..d {
                gram[p * d + q] += row[p] * row[q];
            }
        }
    }
    for p in 0..d {
        for q in 0..p {
            gram[p * d + q] = gram[q * d + p];
        }
    }
    gram
}

/// `XXᵀ`, `rows x rows`.
fn row_gram(matrix: &FeatureMatrix) -> Vec<f64> {
    let n = matrix.rows();
    let mut gram = vec![0.0; n * n];
    for p in 0..n {
        for q in p..n {
            let value = dot(matrix.row(p), matrix.row(q));
            gram[p * n + q] = value;
            gram[q * n + p] = value;
        }
    }
    gram
}

/// Indices of the `k` largest eigenvalues, descending, ties by index.
fn top_pairs(values: &[f64], k: usize) -> Vec<(f64, usize)> {
    let mut pairs: Vec<(f64, usize)> = values.iter().copied().zip(0..).collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    pairs.truncate(k);
    pairs
}

/// Flips `v` so its largest-magnitude entry is positive.
fn orient(v: &mut [f64]) {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        v.iter_mut().for_each(|x| *x = -*x);
    }
}

/// Variance of each embedding column over the total variance of `matrix`.
fn variance_ratio(matrix: &FeatureMatrix, embedding: &FeatureMatrix) -> Vec<f64> {
    let total: f64 = (0..matrix.cols()).map(|c| column_variance(matrix, c)).sum();
    (0..embedding.cols())
        .map(|c| {
            if total <= f64::EPSILON {
                0.0
            } else {
                column_variance(embedding, c) / total
            }
        })
        .collect()
}

fn column_variance(matrix: &FeatureMatrix, col: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = matrix.rows() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = matrix.iter_rows().map(|r| r[col]).sum::<f64>() / n;
    matrix
        .iter_rows()
        .map(|r| (r[col] - mean) * (r[col] - mean))
        .sum::<f64>()
        / n
}

/// Eigen-decomposition of a symmetric `n x n` row-major matrix.
///
/// Returns `(eigenvalues, eigenvectors)`; eigenvector `j` is column `j` of the
/// row-major `n x n` result.
pub(crate) fn symmetric_eigen(mut a: Vec<f64>, n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut v = vec![0.0; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }

    let total: f64 = a.iter().map(|x| x * x).sum();
    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[p * n + q] * a[p * n + q];
            }
        }
        if off <= CONVERGENCE_RATIO * total {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[p * n + q];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[q * n + q] - a[p * n + p]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[k * n + p];
                    let akq = a[k * n + q];
                    a[k * n + p] = c * akp - s * akq;
                    a[k * n + q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p * n + k];
                    let aqk = a[q * n + k];
                    a[p * n + k] = c * apk - s * aqk;
                    a[q * n + k] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[k * n + p];
                    let vkq = v[k * n + q];
                    v[k * n + p] = c * vkp - s * vkq;
                    v[k * n + q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let values = (0..n).map(|i| a[i * n + i]).collect();
    (values, v)
}
