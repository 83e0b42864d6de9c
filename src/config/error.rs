//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid broker URL format (expected amqp:// or amqps://)")]
    InvalidBrokerUrl,

    #[error("Broker prefetch must be at least 1")]
    InvalidPrefetch,

    #[error("Reconnect delays must be positive and initial <= max")]
    InvalidReconnectDelay,

    #[error("JWT secret must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    #[error("Invalid delivery gateway URL (expected http:// or https://)")]
    InvalidGatewayUrl,

    #[error("Realtime timing values must be positive")]
    InvalidRealtimeTiming,

    #[error("Rejection TTL must not be shorter than the throttle window")]
    RejectionTtlTooShort,
}
