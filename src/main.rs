//! feedback-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use feedback_gateway::api;
use feedback_gateway::app_state::AppState;
use feedback_gateway::config::{GatewayConfig, LogFormat};
use feedback_gateway::domain::{EventBus, SystemClock};
use feedback_gateway::persistence::{InMemoryStore, PostgresStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting feedback-gateway");

    // Build persistence layer
    let store: Arc<dyn Store> = if config.persistence_enabled {
        let pg = PostgresStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        if config.database_run_migrations {
            pg.run_migrations().await.context("running migrations")?;
        }
        Arc::new(pg)
    } else {
        tracing::warn!("persistence disabled, data lives in memory only");
        Arc::new(InMemoryStore::new())
    };

    // Build application state
    let event_bus = EventBus::new(config.event_bus_capacity);
    let app_state = AppState::new(
        store,
        event_bus,
        Arc::new(SystemClock),
        config.emoticon_policy.clone(),
    );

    let app = api::build_app(
        app_state,
        Duration::from_secs(config.request_timeout_secs),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
