use std::sync::Arc;

use tenant_artifact_api::config::{AppConfig, StoreBackendKind};
use tenant_artifact_api::database::{MemoryBackend, PostgresBackend, StoreBackend};
use tenant_artifact_api::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    config.validate()?;
    tracing::info!(
        "Starting tenant artifact API in {:?} mode with {:?} store",
        config.environment,
        config.store.backend
    );

    let mut postgres = None;
    let backend: Arc<dyn StoreBackend> = match config.store.backend {
        StoreBackendKind::Memory => Arc::new(MemoryBackend::new()),
        StoreBackendKind::Postgres => {
            let pg = Arc::new(PostgresBackend::connect(&config.store).await?);
            postgres = Some(pg.clone());
            pg
        }
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(config, backend)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg) = postgres {
        pg.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
