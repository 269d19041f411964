//! Herd REST API Server
//!
//! Serves the herd registry, purity classification and genealogy trees over
//! HTTP, backed by a seeded in-memory store.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! cargo run --bin herd_server --features server -- herd.yaml
//!
//! # Test endpoints
//! curl http://localhost:3000/api/animals
//! curl http://localhost:3000/api/animals/BNN-0042/genealogy?max_level=3
//! curl -X POST http://localhost:3000/api/purity/classify \
//!   -H "Content-Type: application/json" \
//!   -d '{"mother": "PO", "father": "F1"}'
//! curl http://localhost:3000/api/health
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use boi_na_nuvem::api::{create_herd_router, AppState};
use boi_na_nuvem::seed::{generate_herd, HerdSummary};
use boi_na_nuvem::HerdConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config =
        HerdConfig::load(config_path.as_deref()).context("Failed to load herd configuration")?;

    let store = generate_herd(&config.seed, config.purity.table)
        .context("Failed to generate seed herd")?;
    let summary = HerdSummary::of(&store);
    tracing::info!(
        animals = summary.animals,
        table = %config.purity.table,
        "seed herd ready"
    );

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;

    let app = create_herd_router(AppState::new(store, config))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Herd API listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
