//! The four interchangeable recommendation strategies.
//!
//! Every strategy maps `(matrix, reference row, count)` to an ordered list of
//! row indices that never contains the reference row and never holds more
//! than `count` entries.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;
use crate::neighbors::NearestNeighbors;
use crate::partition::KMeans;
use crate::reduction::TruncatedSvd;
use crate::similarity::most_similar;

/// Strategy selector, parsed from the exact lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Cosine similarity over raw features.
    #[default]
    Cosine,
    /// Euclidean k-nearest neighbours.
    Knn,
    /// Cosine similarity in a truncated-SVD latent space.
    Matrix,
    /// Same k-means cluster, with random backfill.
    Cluster,
}

impl Algorithm {
    /// All algorithms in presentation order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Cosine,
        Algorithm::Knn,
        Algorithm::Matrix,
        Algorithm::Cluster,
    ];

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Cosine => "cosine",
            Algorithm::Knn => "knn",
            Algorithm::Matrix => "matrix",
            Algorithm::Cluster => "cluster",
        }
    }

    /// One-line description for API listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Cosine => "Cosine similarity between one-hot genre/publisher and normalized year/rating features",
            Algorithm::Knn => "Euclidean nearest neighbours in feature space",
            Algorithm::Matrix => "Cosine similarity after truncated SVD projection to a latent space",
            Algorithm::Cluster => "Books from the same k-means cluster, backfilled at random",
        }
    }

    /// Whether two identical requests always return identical results.
    #[must_use]
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Algorithm::Cluster)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Shared recommendation capability.
pub trait Strategy: Send + Sync {
    /// Which algorithm this strategy implements.
    fn algorithm(&self) -> Algorithm;

    /// Ranks candidate rows for `reference`.
    ///
    /// `rng` is only consumed by strategies with a random component.
    fn recommend(
        &self,
        matrix: &FeatureMatrix,
        reference: usize,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>>;
}

fn check_reference(matrix: &FeatureMatrix, reference: usize) -> Result<()> {
    if reference >= matrix.rows() {
        return Err(Error::InvalidParameter(format!(
            "reference row {reference} outside a matrix of {} rows",
            matrix.rows()
        )));
    }
    Ok(())
}

/// Cosine similarity on raw feature rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineStrategy;

impl Strategy for CosineStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Cosine
    }

    fn recommend(
        &self,
        matrix: &FeatureMatrix,
        reference: usize,
        count: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        check_reference(matrix, reference)?;
        Ok(most_similar(matrix, reference, count))
    }
}

/// Euclidean k-NN; asks for `count + 1` neighbours to make room for the
/// reference row itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnnStrategy;

impl Strategy for KnnStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Knn
    }

    fn recommend(
        &self,
        matrix: &FeatureMatrix,
        reference: usize,
        count: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        check_reference(matrix, reference)?;
        let index = NearestNeighbors::fit(matrix, DistanceMetric::Euclidean);
        Ok(index
            .kneighbors_of_row(reference, count.saturating_add(1))
            .into_iter()
            .map(|hit| hit.row)
            .filter(|&row| row != reference)
            .take(count)
            .collect())
    }
}

/// Cosine similarity on truncated-SVD projections, refitted per call.
#[derive(Debug, Clone, Copy)]
pub struct LatentStrategy {
    latent_dim: usize,
}

impl LatentStrategy {
    /// Creates a strategy projecting to `latent_dim` components.
    #[must_use]
    pub fn new(latent_dim: usize) -> Self {
        Self { latent_dim }
    }
}

impl Strategy for LatentStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Matrix
    }

    fn recommend(
        &self,
        matrix: &FeatureMatrix,
        reference: usize,
        count: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        check_reference(matrix, reference)?;
        let projection = TruncatedSvd::new(self.latent_dim).fit_transform(matrix)?;
        Ok(most_similar(&projection.embedding, reference, count))
    }
}

/// Same-cluster members in row order, then random rows from other clusters.
///
/// Clustering is seeded and deterministic; the backfill draws from `rng` and
/// is deterministic only when the caller passes a seeded generator.
#[derive(Debug, Clone, Copy)]
pub struct ClusterStrategy {
    kmeans: KMeans,
}

impl ClusterStrategy {
    /// Creates a strategy around a configured k-means estimator.
    #[must_use]
    pub fn new(kmeans: KMeans) -> Self {
        Self { kmeans }
    }
}

impl Strategy for ClusterStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Cluster
    }

    fn recommend(
        &self,
        matrix: &FeatureMatrix,
        reference: usize,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        check_reference(matrix, reference)?;
        let partition = self.kmeans.fit(matrix)?;
        let labels = partition.labels();
        let cluster = labels[reference];

        let mut picks: Vec<usize> = partition
            .members(cluster)
            .into_iter()
            .filter(|&row| row != reference)
            .take(count)
            .collect();

        if picks.len() < count {
            let mut outside: Vec<usize> = (0..matrix.rows())
                .filter(|&row| labels[row] != cluster)
                .collect();
            outside.shuffle(rng);
            let missing = count - picks.len();
            tracing::debug!(
                cluster,
                same_cluster = picks.len(),
                backfill = missing.min(outside.len()),
                "Backfilling cluster recommendations"
            );
            picks.extend(outside.into_iter().take(missing));
        }
        Ok(picks)
    }
}
