//! Realtime gateway process.
//!
//! Serves the WebSocket endpoint (`/ws`), the push ingress the notification
//! worker calls (`/websocket/notifications`, `/internal/notifications/websocket`)
//! and `/health`. Owns the session registry and its rejection-cache sweeper.

use std::sync::Arc;

use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use task_notifier::adapters::auth::JwtTokenVerifier;
use task_notifier::adapters::http::{cors_layer, realtime_routes};
use task_notifier::adapters::websocket::{
    websocket_router, RealtimeGateway, RoomManager, SessionRegistry,
};
use task_notifier::config::AppConfig;
use task_notifier::ports::TokenVerifier;
use task_notifier::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        addr = %config.server.socket_addr(),
        "Starting realtime gateway"
    );

    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtTokenVerifier::new(
        &config.auth.jwt_secret,
        config.auth.leeway_secs,
    ));
    let registry = Arc::new(SessionRegistry::new(config.realtime.registry_config()));
    let rooms = Arc::new(RoomManager::new(config.realtime.channel_capacity));
    let gateway = RealtimeGateway::new(registry.clone(), rooms, verifier);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = registry.spawn_sweeper(shutdown_rx);

    let app = websocket_router()
        .merge(realtime_routes())
        .with_state(gateway)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.cors_origins_list()));

    let listener = tokio::net::TcpListener::bind(config.server.socket_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Realtime gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!("Sweeper task ended abnormally: {}", e);
    }

    tracing::info!("Realtime gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down gracefully...");
}
