use anyhow::Context;

use inventory_api::{app, config::AppConfig, database::Store, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!("Starting Inventory API in {:?} mode", config.environment);
    config.validate().context("invalid configuration")?;

    let store = Store::connect(&config.database)
        .await
        .context("failed to open database")?;
    store.health_check().await.context("database unreachable")?;
    store.migrate(false).await.context("failed to create tables")?;

    let bind_addr = config.bind_address();
    let state = AppState::new(config, store.clone()).context("invalid configuration")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Inventory API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
