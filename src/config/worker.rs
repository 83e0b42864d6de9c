//! Notification worker HTTP listener

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;
use super::server::{bind_addr, default_host};

/// Where the worker serves the notification read API.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl WorkerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        bind_addr(&self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3004
}
