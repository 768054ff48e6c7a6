//! HTTP handlers for the SmartReads REST API.
//!
//! - `health`: service description and liveness
//! - `books`: catalog browsing
//! - `recommend`: recommendation requests
//! - `stats`: catalog statistics
//! - `algorithms`: algorithm listing and live evaluation

pub mod algorithms;
pub mod books;
pub mod health;
pub mod helpers;
pub mod recommend;
pub mod stats;

pub use algorithms::{algorithm_performance, list_algorithms};
pub use books::{get_book, list_books};
pub use health::{health_check, service_info};
pub use recommend::recommend;
pub use stats::dataset_stats;
