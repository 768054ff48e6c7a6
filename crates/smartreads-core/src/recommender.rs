//! Recommendation dispatcher.
//!
//! Resolves the reference book, encodes the catalog, runs the selected
//! strategy and maps the returned row indices back to books by row index.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rand::RngCore;

use crate::book::Book;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::features::{encode, FeatureMatrix};
use crate::strategy::{
    Algorithm, ClusterStrategy, CosineStrategy, KnnStrategy, LatentStrategy, Strategy,
};

/// Runs one recommendation request against `catalog` with default engine
/// parameters and a thread-local random source.
///
/// # Errors
///
/// Checked in this order:
/// - [`Error::InvalidParameter`] if `count` is zero
/// - [`Error::ItemNotFound`] if `reference_id` is not in the catalog, which
///   is always the case for an empty catalog
/// - [`Error::UnknownAlgorithm`] if `algorithm` is not one of
///   `cosine`, `knn`, `matrix`, `cluster`
/// - [`Error::InvalidParameter`] if the strategy cannot run on this catalog
///   (latent dimension or cluster count too large)
pub fn dispatch(
    catalog: &Catalog,
    reference_id: u64,
    algorithm: &str,
    count: usize,
) -> Result<Vec<Book>> {
    let engine = EngineConfig::default();
    dispatch_with(
        catalog,
        &engine,
        reference_id,
        algorithm,
        count,
        &mut rand::thread_rng(),
    )
}

/// Like [`dispatch`] with explicit engine parameters and random source.
pub fn dispatch_with(
    catalog: &Catalog,
    engine: &EngineConfig,
    reference_id: u64,
    algorithm: &str,
    count: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Book>> {
    let (reference, algorithm) = resolve(catalog, reference_id, algorithm, count)?;
    let matrix = encode(catalog)?;
    run(catalog, &matrix, engine, reference, algorithm, count, rng)
}

/// Shared, long-lived recommender over an immutable catalog.
///
/// Cheap to share across request handlers behind an `Arc`. When
/// `cache_features` is enabled the encoded matrix is computed once; the
/// catalog never changes, so the cache never needs invalidation.
pub struct Recommender {
    catalog: Arc<Catalog>,
    engine: EngineConfig,
    features: RwLock<Option<Arc<FeatureMatrix>>>,
}

impl Recommender {
    /// Creates a recommender over `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, engine: EngineConfig) -> Self {
        Self {
            catalog,
            engine,
            features: RwLock::new(None),
        }
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Engine parameters.
    #[must_use]
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Encoded feature matrix, memoized when caching is enabled.
    pub fn features(&self) -> Result<Arc<FeatureMatrix>> {
        if !self.engine.cache_features {
            return Ok(Arc::new(encode(&self.catalog)?));
        }
        if let Some(matrix) = self.features.read().as_ref() {
            return Ok(Arc::clone(matrix));
        }
        let mut slot = self.features.write();
        if let Some(matrix) = slot.as_ref() {
            return Ok(Arc::clone(matrix));
        }
        let matrix = Arc::new(encode(&self.catalog)?);
        *slot = Some(Arc::clone(&matrix));
        Ok(matrix)
    }

    /// Recommends up to `count` books similar to `reference_id`.
    pub fn recommend(&self, reference_id: u64, algorithm: &str, count: usize) -> Result<Vec<Book>> {
        self.recommend_with_rng(reference_id, algorithm, count, &mut rand::thread_rng())
    }

    /// Like [`Recommender::recommend`] with an injected random source.
    pub fn recommend_with_rng(
        &self,
        reference_id: u64,
        algorithm: &str,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Book>> {
        let (reference, algorithm) = resolve(&self.catalog, reference_id, algorithm, count)?;
        let matrix = self.features()?;
        run(&self.catalog, &matrix, &self.engine, reference, algorithm, count, rng)
    }

    /// Row indices for an already-resolved request. Used by evaluation.
    pub fn rank_rows(
        &self,
        reference: usize,
        algorithm: Algorithm,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        let matrix = self.features()?;
        strategy_for(algorithm, &self.engine).recommend(&matrix, reference, count, rng)
    }
}

/// Concrete strategy for an algorithm.
#[must_use]
pub fn strategy_for(algorithm: Algorithm, engine: &EngineConfig) -> Box<dyn Strategy> {
    match algorithm {
        Algorithm::Cosine => Box::new(CosineStrategy),
        Algorithm::Knn => Box::new(KnnStrategy),
        Algorithm::Matrix => Box::new(LatentStrategy::new(engine.latent_dim)),
        Algorithm::Cluster => Box::new(ClusterStrategy::new(engine.kmeans())),
    }
}

fn resolve(
    catalog: &Catalog,
    reference_id: u64,
    algorithm: &str,
    count: usize,
) -> Result<(usize, Algorithm)> {
    if count == 0 {
        return Err(Error::InvalidParameter(
            "count must be a positive integer".to_string(),
        ));
    }
    let reference = catalog
        .row_of(reference_id)
        .ok_or(Error::ItemNotFound(reference_id))?;
    let algorithm: Algorithm = algorithm.parse()?;
    Ok((reference, algorithm))
}

fn run(
    catalog: &Catalog,
    matrix: &FeatureMatrix,
    engine: &EngineConfig,
    reference: usize,
    algorithm: Algorithm,
    count: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Book>> {
    let start = Instant::now();
    let rows = strategy_for(algorithm, engine).recommend(matrix, reference, count, rng)?;
    let books: Vec<Book> = rows
        .into_iter()
        .filter_map(|row| catalog.get(row).cloned())
        .collect();
    tracing::debug!(
        %algorithm,
        reference,
        count,
        returned = books.len(),
        elapsed_us = start.elapsed().as_micros(),
        "Recommendation computed"
    );
    Ok(books)
}
