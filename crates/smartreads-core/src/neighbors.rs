//! Brute-force nearest-neighbour index.
//!
//! Exact search: every query scans all indexed rows. Catalogs are a few
//! thousand rows, well below the point where a graph index pays off.

use crate::distance::{CpuDistance, DistanceEngine, DistanceMetric};
use crate::features::FeatureMatrix;
use crate::similarity::ScoredRow;

/// Exact k-NN index over the rows of a feature matrix.
pub struct NearestNeighbors<'a, E: DistanceEngine = CpuDistance> {
    matrix: &'a FeatureMatrix,
    engine: E,
}

impl<'a> NearestNeighbors<'a> {
    /// Indexes every row of `matrix` using the given metric.
    #[must_use]
    pub fn fit(matrix: &'a FeatureMatrix, metric: DistanceMetric) -> Self {
        Self::with_engine(matrix, CpuDistance::new(metric))
    }
}

impl<'a, E: DistanceEngine> NearestNeighbors<'a, E> {
    /// Indexes every row of `matrix` with a custom distance engine.
    #[must_use]
    pub fn with_engine(matrix: &'a FeatureMatrix, engine: E) -> Self {
        Self { matrix, engine }
    }

    /// Number of indexed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.rows() == 0
    }

    /// Metric used by the index.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.engine.metric()
    }

    /// The `k` rows closest to `query`, by ascending distance.
    ///
    /// Ties are broken by ascending row index. `score` holds the distance.
    #[must_use]
    pub fn kneighbors(&self, query: &[f64], k: usize) -> Vec<ScoredRow> {
        let mut hits: Vec<ScoredRow> = self
            .engine
            .batch_distance(query, self.matrix.iter_rows())
            .into_iter()
            .enumerate()
            .map(|(row, score)| ScoredRow { row, score })
            .collect();
        hits.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.row.cmp(&b.row)));
        hits.truncate(k);
        hits
    }

    /// Neighbours of an indexed row.
    #[must_use]
    pub fn kneighbors_of_row(&self, row: usize, k: usize) -> Vec<ScoredRow> {
        self.kneighbors(self.matrix.row(row), k)
    }
}
