//! pot-ledger server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pot_ledger::api;
use pot_ledger::app_state::AppState;
use pot_ledger::config::LedgerConfig;
use pot_ledger::persistence::{LedgerStore, MemoryStore, PostgresStore};
use pot_ledger::service::LedgerService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = LedgerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting pot-ledger");

    // Build persistence layer
    let store: Arc<dyn LedgerStore> = if config.persistence_enabled {
        let store = PostgresStore::connect(&config).await?;
        store.migrate().await?;
        tracing::info!("using PostgreSQL store");
        Arc::new(store)
    } else {
        tracing::warn!("PERSISTENCE_ENABLED is off, data lives in memory only");
        Arc::new(MemoryStore::new())
    };

    // Build service layer
    let ledger_service = Arc::new(LedgerService::new(store));

    // Build application state
    let app_state = AppState {
        ledger_service,
        default_number_of_dates: config.default_number_of_dates,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
