//! Session registry and handshake rejection cache.
//!
//! Tracks which connection currently represents each user and remembers
//! recently rejected credentials so a client retrying with an expired token
//! is turned away without re-verifying it.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `throttle_window` | 60s | Rejections younger than this throttle the credential |
//! | `rejection_ttl` | 120s | Sweep drops rejections older than this |
//! | `sweep_interval` | 30s | How often the background sweeper runs |
//!
//! Both maps sit behind a single mutex, so a register and a sweep never
//! interleave.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time;

use crate::domain::foundation::{ConnectionId, Timestamp, UserId};
use crate::domain::realtime::CredentialFingerprint;

/// Timing configuration for the registry.
#[derive(Debug, Clone)]
pub struct SessionRegistryConfig {
    pub throttle_window: Duration,
    pub rejection_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for SessionRegistryConfig {
    fn default() -> Self {
        Self {
            throttle_window: Duration::from_secs(60),
            rejection_ttl: Duration::from_secs(120),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

#[derive(Default)]
struct RegistryState {
    sessions: HashMap<UserId, ConnectionId>,
    rejections: HashMap<CredentialFingerprint, Timestamp>,
}

/// Owned registry of live sessions, shared via `Arc`.
pub struct SessionRegistry {
    state: Mutex<RegistryState>,
    config: SessionRegistryConfig,
}

impl SessionRegistry {
    pub fn new(config: SessionRegistryConfig) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            config,
        }
    }

    pub fn config(&self) -> &SessionRegistryConfig {
        &self.config
    }

    // ════════════════════════════════════════════════════════════════════════
    // Sessions
    // ════════════════════════════════════════════════════════════════════════

    /// Record `connection` as the user's live session. Last writer wins.
    ///
    /// Returns the connection that was replaced, if any. The replaced socket
    /// is not closed here.
    pub async fn register(&self, user: UserId, connection: ConnectionId) -> Option<ConnectionId> {
        self.state.lock().await.sessions.insert(user, connection)
    }

    /// Remove the user's session only if it is still `connection`.
    ///
    /// A stale disconnect from a replaced socket must not evict the newer
    /// session, so a mismatch is a no-op. Returns whether anything was
    /// removed.
    pub async fn unregister(&self, user: &UserId, connection: &ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        match state.sessions.get(user) {
            Some(current) if current == connection => {
                state.sessions.remove(user);
                true
            }
            _ => false,
        }
    }

    pub async fn is_connected(&self, user: &UserId) -> bool {
        self.state.lock().await.sessions.contains_key(user)
    }

    pub async fn connection_for(&self, user: &UserId) -> Option<ConnectionId> {
        self.state.lock().await.sessions.get(user).copied()
    }

    /// Number of users with a live session.
    pub async fn count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Rejection cache
    // ════════════════════════════════════════════════════════════════════════

    pub async fn record_rejection(&self, fingerprint: CredentialFingerprint, now: Timestamp) {
        self.state.lock().await.rejections.insert(fingerprint, now);
    }

    /// True iff the fingerprint was rejected less than `throttle_window` ago.
    pub async fn is_throttled(&self, fingerprint: CredentialFingerprint, now: Timestamp) -> bool {
        let state = self.state.lock().await;
        match state.rejections.get(&fingerprint) {
            Some(rejected_at) => elapsed(rejected_at, &now) < self.config.throttle_window,
            None => false,
        }
    }

    /// Drop rejections older than `rejection_ttl`. Returns how many went.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let ttl = self.config.rejection_ttl;
        let mut state = self.state.lock().await;
        let before = state.rejections.len();
        state
            .rejections
            .retain(|_, rejected_at| elapsed(rejected_at, &now) <= ttl);
        before - state.rejections.len()
    }

    pub async fn rejection_count(&self) -> usize {
        self.state.lock().await.rejections.len()
    }

    /// Run the sweep every `sweep_interval` until shutdown is signalled.
    pub fn spawn_sweeper(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval(self.config.sweep_interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = shutdown.changed() => {
                        // A dropped sender also means shutdown.
                        if changed.is_err() || *shutdown.borrow() {
                            tracing::debug!("rejection sweeper stopping");
                            return;
                        }
                    }

                    _ = interval.tick() => {
                        let removed = self.sweep(Timestamp::now()).await;
                        if removed > 0 {
                            tracing::debug!(removed, "swept expired handshake rejections");
                        }
                    }
                }
            }
        })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionRegistryConfig::default())
    }
}

fn elapsed(since: &Timestamp, now: &Timestamp) -> Duration {
    now.duration_since(since).to_std().unwrap_or(Duration::ZERO)
}
