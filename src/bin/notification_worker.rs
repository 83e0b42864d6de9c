//! Notification worker process.
//!
//! Consumes task events from RabbitMQ, persists one notification per
//! recipient, pushes them through the gateway ingress, and serves the
//! authenticated notification read API under `/notifications`.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::sync::watch;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use task_notifier::adapters::auth::JwtTokenVerifier;
use task_notifier::adapters::broker::{AmqpEventConsumer, EventDispatcher};
use task_notifier::adapters::delivery::HttpDeliveryBridge;
use task_notifier::adapters::http::middleware::{auth_middleware, AuthState};
use task_notifier::adapters::http::{cors_layer, notification_routes, NotificationHandlers};
use task_notifier::adapters::postgres::PostgresNotificationRepository;
use task_notifier::application::NotificationFanOut;
use task_notifier::config::AppConfig;
use task_notifier::domain::task::EventKind;
use task_notifier::ports::{NotificationDelivery, NotificationRepository};
use task_notifier::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.server);
    config.validate_for_worker()?;

    tracing::info!(
        environment = ?config.server.environment,
        addr = %config.worker.socket_addr(),
        exchange = %config.broker.exchange,
        gateway_url = %config.delivery.gateway_url,
        "Starting notification worker"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let repository: Arc<dyn NotificationRepository> =
        Arc::new(PostgresNotificationRepository::new(pool));
    let delivery: Arc<dyn NotificationDelivery> =
        Arc::new(HttpDeliveryBridge::new(config.delivery.http_config())?);

    let fan_out = Arc::new(NotificationFanOut::new(repository.clone(), delivery));
    let dispatcher = EventDispatcher::new().subscribe_all(&EventKind::ALL, fan_out);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer =
        AmqpEventConsumer::new(config.broker.consumer_config(), Arc::new(dispatcher))
            .spawn(shutdown_rx);

    let verifier: AuthState = Arc::new(JwtTokenVerifier::new(
        &config.auth.jwt_secret,
        config.auth.leeway_secs,
    ));
    let app = Router::new()
        .nest(
            "/notifications",
            notification_routes(NotificationHandlers::new(repository)),
        )
        .layer(middleware::from_fn_with_state(verifier, auth_middleware))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.cors_origins_list()));

    let listener = tokio::net::TcpListener::bind(config.worker.socket_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Notification API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = consumer.await {
        tracing::warn!("Event consumer task ended abnormally: {}", e);
    }

    tracing::info!("Notification worker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down gracefully...");
}
