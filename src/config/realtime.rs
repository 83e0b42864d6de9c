//! Realtime gateway timing and buffering

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::websocket::SessionRegistryConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// A fingerprint rejected within this window is refused without verification
    #[serde(default = "default_throttle_window")]
    pub throttle_window_secs: u64,

    /// Rejection-cache entries older than this are swept
    #[serde(default = "default_rejection_ttl")]
    pub rejection_ttl_secs: u64,

    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Per-connection outbound queue size
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    pub fn registry_config(&self) -> SessionRegistryConfig {
        SessionRegistryConfig {
            throttle_window: Duration::from_secs(self.throttle_window_secs),
            rejection_ttl: Duration::from_secs(self.rejection_ttl_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.throttle_window_secs == 0
            || self.rejection_ttl_secs == 0
            || self.sweep_interval_secs == 0
            || self.channel_capacity == 0
        {
            return Err(ValidationError::InvalidRealtimeTiming);
        }
        if self.rejection_ttl_secs < self.throttle_window_secs {
            return Err(ValidationError::RejectionTtlTooShort);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            throttle_window_secs: default_throttle_window(),
            rejection_ttl_secs: default_rejection_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_throttle_window() -> u64 {
    60
}

fn default_rejection_ttl() -> u64 {
    120
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_channel_capacity() -> usize {
    128
}
