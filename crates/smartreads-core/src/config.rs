//! Layered configuration for SmartReads.
//!
//! Precedence, lowest to highest:
//! 1. Built-in defaults
//! 2. TOML file (`smartreads.toml` or an explicit path)
//! 3. Environment variables prefixed `SMARTREADS_`, nested with `__`
//!    (e.g. `SMARTREADS_ENGINE__LATENT_DIM=10`)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::partition::KMeans;
use crate::strategy::Algorithm;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "smartreads.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SMARTREADS_";

/// `SMARTREADS_*` variables owned by the server command line, not by the
/// configuration tree (keys after the prefix is stripped).
pub const CLI_ENV_KEYS: &[&str] = &["config", "host", "port", "catalog", "cors_origin"];

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Provider failed to parse or merge.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A value is out of range.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Dotted key path.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SmartReadsConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Catalog source.
    pub catalog: CatalogConfig,
    /// Recommendation engine parameters.
    pub engine: EngineConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Allowed CORS origins; empty means permissive.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file. Generated from the synthetic source when missing.
    pub path: Option<PathBuf>,
    /// Size of the synthetic catalog.
    pub synthetic_size: usize,
    /// Seed of the synthetic catalog.
    pub seed: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from("data/books.json")),
            synthetic_size: 2000,
            seed: 7,
        }
    }
}

/// Recommendation engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Algorithm used when the request names none.
    pub default_algorithm: Algorithm,
    /// Count used when the request gives none.
    pub default_count: usize,
    /// Largest count a request may ask for.
    pub max_count: usize,
    /// Latent dimensions for the `matrix` strategy.
    pub latent_dim: usize,
    /// Number of clusters for the `cluster` strategy.
    pub num_clusters: usize,
    /// Seed for k-means++ initialization.
    pub cluster_seed: u64,
    /// Lloyd iteration cap per restart.
    pub max_iter: usize,
    /// Number of k-means restarts.
    pub n_init: usize,
    /// Memoize the encoded feature matrix across requests.
    pub cache_features: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Cosine,
            default_count: 5,
            max_count: 100,
            latent_dim: 20,
            num_clusters: 10,
            cluster_seed: crate::partition::DEFAULT_SEED,
            max_iter: 300,
            n_init: 3,
            cache_features: true,
        }
    }
}

impl EngineConfig {
    /// K-means estimator described by this configuration.
    #[must_use]
    pub fn kmeans(&self) -> KMeans {
        KMeans::new(self.num_clusters)
            .with_seed(self.cluster_seed)
            .with_max_iter(self.max_iter)
            .with_n_init(self.n_init)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug".to_string(),
        }
    }
}

impl SmartReadsConfig {
    /// Loads defaults, then `smartreads.toml` if present, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads defaults, then `path` (or `smartreads.toml`), then environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        let config: Self = Self::figment(&file).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML string over the defaults, without reading the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Provider chain used by [`SmartReadsConfig::load_from`].
    #[must_use]
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__").ignore(CLI_ENV_KEYS))
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.default_count == 0 {
            return Err(invalid("engine.default_count", "must be at least 1"));
        }
        if engine.max_count < engine.default_count {
            return Err(invalid(
                "engine.max_count",
                "must be at least engine.default_count",
            ));
        }
        if engine.latent_dim == 0 {
            return Err(invalid("engine.latent_dim", "must be at least 1"));
        }
        if engine.num_clusters == 0 {
            return Err(invalid("engine.num_clusters", "must be at least 1"));
        }
        if engine.max_iter == 0 {
            return Err(invalid("engine.max_iter", "must be at least 1"));
        }
        if engine.n_init == 0 {
            return Err(invalid("engine.n_init", "must be at least 1"));
        }
        if self.catalog.path.is_none() && self.catalog.synthetic_size == 0 {
            return Err(invalid(
                "catalog.synthetic_size",
                "must be at least 1 when no catalog path is set",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
