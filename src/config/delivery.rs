//! Delivery bridge configuration (notification worker only)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::delivery::{HttpDeliveryConfig, DEFAULT_GATEWAY_URL};

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Gateway ingress endpoint the worker POSTs push requests to
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl DeliveryConfig {
    pub fn http_config(&self) -> HttpDeliveryConfig {
        HttpDeliveryConfig {
            gateway_url: self.gateway_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.gateway_url.starts_with("http://") && !self.gateway_url.starts_with("https://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
