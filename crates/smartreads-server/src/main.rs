#![allow(clippy::doc_markdown)]
//! SmartReads Server - REST API for book recommendations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use smartreads_core::{generate_catalog, Catalog, CatalogConfig, Recommender, SmartReadsConfig};
use smartreads_server::{build_cors_layer, build_router, AppState};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SmartReads Server - content-based book recommendations
#[derive(Parser, Debug)]
#[command(name = "smartreads-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./smartreads.toml when present)
    #[arg(short, long, env = "SMARTREADS_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "SMARTREADS_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SMARTREADS_PORT")]
    port: Option<u16>,

    /// JSON catalog file; generated when missing
    #[arg(long, env = "SMARTREADS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Loads the catalog file, or generates the synthetic catalog and writes it
/// to the configured path so later starts reuse it.
fn load_catalog(config: &CatalogConfig) -> anyhow::Result<Catalog> {
    if let Some(path) = config.path.as_deref() {
        if path.exists() {
            let catalog = Catalog::load_json(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            tracing::info!("Loaded {} books from {}", catalog.len(), path.display());
            return Ok(catalog);
        }
    }

    let catalog = generate_catalog(config.synthetic_size, config.seed)?;
    if let Some(path) = config.path.as_deref() {
        save_generated(&catalog, path);
    }
    Ok(catalog)
}

fn save_generated(catalog: &Catalog, path: &Path) {
    // A read-only data directory should not prevent serving.
    if let Err(e) = catalog.save_json(path) {
        tracing::warn!(error = %e, "Could not cache catalog at {}", path.display());
    }
}

fn cors_origins(configured: &[String]) -> Vec<String> {
    match std::env::var("SMARTREADS_CORS_ORIGIN") {
        Ok(origins) => origins.split(',').map(|o| o.trim().to_string()).collect(),
        Err(_) => configured.to_vec(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = SmartReadsConfig::load_from(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(path) = args.catalog {
        config.catalog.path = Some(path);
    }

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SmartReads server...");

    let catalog = load_catalog(&config.catalog)?;
    if catalog.is_empty() {
        anyhow::bail!("catalog is empty; nothing to recommend");
    }
    tracing::info!(
        books = catalog.len(),
        default_algorithm = %config.engine.default_algorithm,
        latent_dim = config.engine.latent_dim,
        num_clusters = config.engine.num_clusters,
        "Recommendation engine ready"
    );

    let recommender = Recommender::new(Arc::new(catalog), config.engine.clone());
    let state = Arc::new(AppState::new(recommender));

    let app = build_router(state)
        .layer(build_cors_layer(&cors_origins(&config.server.cors_origins)))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("SmartReads server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
