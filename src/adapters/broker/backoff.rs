//! Reconnect backoff for the broker consumer.
//!
//! ```text
//! Attempt    Delay (initial=1s, ×2, cap 60s)    With jitter (±20%)
//! ─────────────────────────────────────────────────────────────────
//!    0              1s                           0.8s - 1.2s
//!    1              2s                           1.6s - 2.4s
//!    2              4s                           3.2s - 4.8s
//!    ...
//!    6+            60s                           48s - 72s
//! ```

use std::time::Duration;

use rand::Rng;

/// Exponential backoff with jitter. Retries forever.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Fraction of the delay added or removed at random (0.2 = ±20%).
    pub jitter_factor: f64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt` (0-indexed), without jitter.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(attempt.min(64) as i32);
        let secs = self.initial_delay.as_secs_f64() * factor;
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }

    /// Delay before reconnect attempt `attempt`, with jitter applied.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt).as_secs_f64();
        let range = base * self.jitter_factor.clamp(0.0, 1.0);
        let jitter = if range > 0.0 {
            rand::thread_rng().gen_range(-range..=range)
        } else {
            0.0
        };
        Duration::from_secs_f64((base + jitter).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_delay_doubles_until_cap() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.base_delay(0), Duration::from_secs(1));
        assert_eq!(policy.base_delay(1), Duration::from_secs(2));
        assert_eq!(policy.base_delay(3), Duration::from_secs(8));
        assert_eq!(policy.base_delay(6), Duration::from_secs(60));
        assert_eq!(policy.base_delay(1_000), Duration::from_secs(60));
    }

    #[test]
    fn jitter_stays_within_factor() {
        let policy = ReconnectPolicy::default();
        for _ in 0..100 {
            let delay = policy.delay_for(2).as_secs_f64();
            assert!((3.19..=4.81).contains(&delay), "delay {} out of range", delay);
        }
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let policy = ReconnectPolicy {
            jitter_factor: 0.0,
            ..ReconnectPolicy::default()
        };
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }
}
