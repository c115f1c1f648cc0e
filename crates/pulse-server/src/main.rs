//! Server entry point: loads settings, opens the store and serves the router.

use std::sync::Arc;

use anyhow::{Context, Result};
use pulse_config::ServerSettings;
use pulse_core::ThreadRandom;
use pulse_server::db::SqliteStore;
use pulse_server::{build_router, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let settings = ServerSettings::from_env();

    let store = SqliteStore::open(&settings.database_path)?;
    info!("Database holds {} saved results", store.count()?);

    let state = Arc::new(ServerState::new(
        Arc::new(store),
        Arc::new(ThreadRandom::new()),
    ));
    let app = build_router(state);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("API ready on http://localhost:{}", settings.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
