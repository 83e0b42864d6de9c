//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `TASK_NOTIFIER` prefix
//! and nested values are separated by double underscores.
//!
//! Both binaries load the same [`AppConfig`]. The gateway validates with
//! [`AppConfig::validate`]; the worker additionally needs its database,
//! broker and delivery sections and calls [`AppConfig::validate_for_worker`].
//!
//! # Example
//!
//! ```no_run
//! use task_notifier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gateway listening on {}", config.server.socket_addr());
//! ```

mod auth;
mod broker;
mod database;
mod delivery;
mod error;
mod realtime;
mod server;
mod worker;

pub use auth::AuthConfig;
pub use broker::BrokerConfig;
pub use database::DatabaseConfig;
pub use delivery::DeliveryConfig;
pub use error::{ConfigError, ValidationError};
pub use realtime::RealtimeConfig;
pub use server::{Environment, ServerConfig};
pub use worker::WorkerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Gateway listener, environment and log filter
    #[serde(default)]
    pub server: ServerConfig,

    /// Worker read-API listener
    #[serde(default)]
    pub worker: WorkerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub broker: BrokerConfig,

    /// Access-token verification (required by both binaries)
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TASK_NOTIFIER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TASK_NOTIFIER__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `TASK_NOTIFIER__BROKER__URL=amqp://...` -> `broker.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TASK_NOTIFIER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the realtime gateway needs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.realtime.validate()?;
        Ok(())
    }

    /// Validate everything the notification worker needs.
    pub fn validate_for_worker(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.worker.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.database.validate()?;
        self.broker.validate()?;
        self.delivery.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
