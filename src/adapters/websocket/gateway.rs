//! Realtime gateway: handshake authentication and the push API.
//!
//! The gateway ties the session registry, the room manager and a token
//! verifier together. The socket handler calls into it for the connection
//! lifecycle; the delivery ingress calls the push operations.
//!
//! # Handshake
//!
//! ```text
//! credential? ──no──▶ Rejected(MissingCredential)
//!     │yes
//! throttled? ──yes──▶ Rejected(Throttled)        (verifier not called)
//!     │no
//! verify ──expired──▶ record rejection, Rejected(Expired)
//!     │   ──other───▶ Rejected(Invalid)
//!     │ok
//! subject? ──no──▶ Rejected(MissingSubject)
//!     │yes
//! Accepted(user)
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio::sync::mpsc;

use crate::domain::foundation::{AuthError, ConnectionId, Timestamp, UserId};
use crate::domain::realtime::{user_room, CredentialFingerprint};
use crate::ports::TokenVerifier;

use super::messages::ServerMessage;
use super::rooms::RoomManager;
use super::session_registry::SessionRegistry;

/// Why a handshake was refused.
///
/// Kept for logs only. Every reason closes the socket the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeRejection {
    MissingCredential,
    Throttled,
    Expired,
    Invalid,
    MissingSubject,
}

impl fmt::Display for HandshakeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandshakeRejection::MissingCredential => "missing_credential",
            HandshakeRejection::Throttled => "throttled",
            HandshakeRejection::Expired => "expired",
            HandshakeRejection::Invalid => "invalid",
            HandshakeRejection::MissingSubject => "missing_subject",
        };
        f.write_str(s)
    }
}

/// A freshly opened session: its id and the queue its socket drains.
pub struct OpenedSession {
    pub connection_id: ConnectionId,
    pub outbound: mpsc::Receiver<ServerMessage>,
}

#[derive(Clone)]
pub struct RealtimeGateway {
    registry: Arc<SessionRegistry>,
    rooms: Arc<RoomManager>,
    verifier: Arc<dyn TokenVerifier>,
}

impl RealtimeGateway {
    pub fn new(
        registry: Arc<SessionRegistry>,
        rooms: Arc<RoomManager>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            registry,
            rooms,
            verifier,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn rooms(&self) -> &Arc<RoomManager> {
        &self.rooms
    }

    // ════════════════════════════════════════════════════════════════════════
    // Connection lifecycle
    // ════════════════════════════════════════════════════════════════════════

    /// Decide whether a handshake carrying `credential` may proceed.
    pub async fn authenticate(
        &self,
        credential: Option<&str>,
    ) -> Result<UserId, HandshakeRejection> {
        let credential = match credential {
            Some(c) if !c.is_empty() => c,
            _ => return Err(HandshakeRejection::MissingCredential),
        };

        let fingerprint = CredentialFingerprint::of(credential);
        if self.registry.is_throttled(fingerprint, Timestamp::now()).await {
            return Err(HandshakeRejection::Throttled);
        }

        match self.verifier.verify(credential).await {
            Ok(claims) => claims.user_id().ok_or(HandshakeRejection::MissingSubject),
            Err(AuthError::TokenExpired) => {
                self.registry
                    .record_rejection(fingerprint, Timestamp::now())
                    .await;
                Err(HandshakeRejection::Expired)
            }
            Err(e) => {
                tracing::debug!(error = %e, "handshake credential rejected");
                Err(HandshakeRejection::Invalid)
            }
        }
    }

    /// Register an authenticated user's connection and join its user room.
    pub async fn open_session(&self, user: &UserId) -> OpenedSession {
        let connection_id = ConnectionId::new();
        let outbound = self.rooms.attach(connection_id).await;
        self.rooms
            .join(&connection_id, &user_room(user.as_str()))
            .await;

        if let Some(previous) = self.registry.register(user.clone(), connection_id).await {
            tracing::debug!(
                user_id = %user,
                previous = %previous,
                connection_id = %connection_id,
                "session replaced"
            );
        }

        OpenedSession {
            connection_id,
            outbound,
        }
    }

    /// Tear down a connection. Stale connections leave the registry alone.
    pub async fn close_session(&self, user: &UserId, connection_id: &ConnectionId) {
        self.rooms.detach(connection_id).await;
        self.registry.unregister(user, connection_id).await;
    }

    pub async fn join_room(&self, connection_id: &ConnectionId, room: &str) -> bool {
        self.rooms.join(connection_id, room).await
    }

    pub async fn leave_room(&self, connection_id: &ConnectionId, room: &str) -> bool {
        self.rooms.leave(connection_id, room).await
    }

    // ════════════════════════════════════════════════════════════════════════
    // Push API
    // ════════════════════════════════════════════════════════════════════════

    /// Emit to every socket in the user's room. Silent if none.
    ///
    /// Returns how many sockets the event was queued on.
    pub async fn send_to_user(&self, user: &UserId, event: &str, payload: JsonValue) -> usize {
        self.send_to_room(&user_room(user.as_str()), event, payload)
            .await
    }

    /// Independent `send_to_user` for each user.
    pub async fn send_to_users(
        &self,
        users: &[UserId],
        event: &str,
        payload: JsonValue,
    ) -> usize {
        let mut reached = 0;
        for user in users {
            reached += self.send_to_user(user, event, payload.clone()).await;
        }
        reached
    }

    /// Emit to every attached socket.
    pub async fn broadcast(&self, event: &str, payload: JsonValue) -> usize {
        self.rooms
            .emit_all(ServerMessage::event(event, payload))
            .await
    }

    /// Emit to every socket in a named room.
    pub async fn send_to_room(&self, room: &str, event: &str, payload: JsonValue) -> usize {
        self.rooms
            .emit_to_room(room, ServerMessage::event(event, payload))
            .await
    }

    pub async fn connected_user_count(&self) -> usize {
        self.registry.count().await
    }

    pub async fn is_user_connected(&self, user: &UserId) -> bool {
        self.registry.is_connected(user).await
    }
}
