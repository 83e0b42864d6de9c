//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. Production emits JSON
/// lines; every other environment gets human-readable output.
pub fn init(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if server.is_production() {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };

    // Only fails if a subscriber is already installed (e.g. in tests).
    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        let config = ServerConfig::default();
        init(&config);
        init(&config);
    }
}
