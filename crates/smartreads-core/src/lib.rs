//! # SmartReads Core
//!
//! Content-based book recommendation engine.
//!
//! A [`Catalog`] of books is encoded into a numeric [`FeatureMatrix`]
//! (one-hot genre and publisher, normalized year and rating). Four
//! interchangeable strategies rank the other books against a reference book:
//!
//! - **cosine**: cosine similarity on raw features
//! - **knn**: Euclidean nearest neighbours
//! - **matrix**: cosine similarity after a truncated SVD projection
//! - **cluster**: same k-means cluster, backfilled at random
//!
//! ## Quick Start
//!
//! ```rust
//! use smartreads_core::{dispatch, Book, Catalog, Genre};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::new(vec![
//!         Book::new(1, Genre::Fiction, "Penguin", 2000, 4.0),
//!         Book::new(2, Genre::Fiction, "Penguin", 2000, 4.0),
//!         Book::new(3, Genre::Mystery, "Penguin", 2020, 1.0),
//!     ])?;
//!
//!     let books = dispatch(&catalog, 1, "cosine", 2)?;
//!     let ids: Vec<u64> = books.iter().map(|b| b.id).collect();
//!     assert_eq!(ids, vec![2, 3]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::float_cmp,
        clippy::cast_precision_loss
    )
)]

pub mod book;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod evaluation;
pub mod features;
#[cfg(test)]
mod features_tests;
pub mod metrics;
#[cfg(test)]
mod metrics_tests;
pub mod neighbors;
#[cfg(test)]
mod neighbors_tests;
pub mod partition;
pub mod recommender;
pub mod reduction;
#[cfg(test)]
mod reduction_tests;
pub mod similarity;
#[cfg(test)]
mod similarity_tests;
pub mod stats;
pub mod strategy;
pub mod synthetic;

pub use book::{Book, Genre};
pub use catalog::Catalog;
pub use config::{
    CatalogConfig, ConfigError, EngineConfig, LoggingConfig, ServerConfig, SmartReadsConfig,
};
pub use distance::{cosine_similarity, euclidean_distance, DistanceMetric};
pub use error::{Error, Result};
pub use evaluation::{evaluate, AlgorithmReport, EvaluationOptions};
pub use features::{encode, FeatureMatrix};
pub use metrics::{compute_latency_percentiles, LatencyStats};
pub use neighbors::NearestNeighbors;
pub use partition::{KMeans, Partition};
pub use recommender::{dispatch, dispatch_with, strategy_for, Recommender};
pub use reduction::{LatentProjection, TruncatedSvd};
pub use similarity::ScoredRow;
pub use stats::CatalogStats;
pub use strategy::{
    Algorithm, ClusterStrategy, CosineStrategy, KnnStrategy, LatentStrategy, Strategy,
};
pub use synthetic::{generate_books, generate_catalog};
