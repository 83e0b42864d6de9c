//! WebSocket message types for realtime notification push.
//!
//! Defines the protocol between the gateway and connected clients:
//! - Server → Client: connection status, pushed events, errors, pongs
//! - Client → Server: room membership changes, pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Handshake accepted.
    Connected(ConnectedMessage),

    /// A named event pushed to the client.
    Event(EventMessage),

    /// Error occurred handling a client message.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

impl ServerMessage {
    /// Builds a pushed event.
    pub fn event(event: impl Into<String>, data: serde_json::Value) -> Self {
        ServerMessage::Event(EventMessage {
            event: event.into(),
            data,
        })
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    /// Event name if this is a pushed event.
    pub fn event_name(&self) -> Option<&str> {
        match self {
            ServerMessage::Event(e) => Some(&e.event),
            _ => None,
        }
    }
}

/// Sent once the handshake succeeds and the user room is joined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub connection_id: String,
    pub user_id: String,
    pub timestamp: String,
}

/// Pushed event with its payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventMessage {
    pub event: String,
    pub data: serde_json::Value,
}

/// Error message sent to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join a named room.
    JoinRoom { room: String },

    /// Leave a named room.
    LeaveRoom { room: String },

    /// Heartbeat request.
    Ping,
}
