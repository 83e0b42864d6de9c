//! WebSocket room management for user- and topic-based message routing.
//!
//! Every attached connection owns a bounded outbound queue. Rooms are sets
//! of connections; a connection may sit in any number of rooms and is
//! always placed in its user room by the gateway.
//!
//! # Architecture
//!
//! ```text
//! Room: user:alice     Room: user:bob       Room: project:7
//! └── conn-1           ├── conn-2           ├── conn-1
//!                      └── conn-3           └── conn-3
//! ```
//!
//! Emitting to a room enqueues the message on each member's queue. A full
//! queue drops the message for that connection only.

use std::collections::{HashMap, HashSet};

use tokio::sync::{mpsc, RwLock};

use crate::domain::foundation::ConnectionId;

use super::messages::ServerMessage;

struct AttachedConnection {
    sender: mpsc::Sender<ServerMessage>,
    rooms: HashSet<String>,
}

#[derive(Default)]
struct Rooms {
    connections: HashMap<ConnectionId, AttachedConnection>,
    members: HashMap<String, HashSet<ConnectionId>>,
}

/// Manages connection queues and room membership.
///
/// # Thread Safety
///
/// Uses `RwLock` since emits (reads) vastly outnumber joins/leaves
/// (writes). Emitting never awaits a slow client.
pub struct RoomManager {
    inner: RwLock<Rooms>,

    /// Outbound queue capacity for each connection.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with specified per-connection capacity.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Rooms::default()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Register a connection and return the receiving end of its queue.
    pub async fn attach(&self, connection: ConnectionId) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.inner.write().await.connections.insert(
            connection,
            AttachedConnection {
                sender: tx,
                rooms: HashSet::new(),
            },
        );
        rx
    }

    /// Remove a connection from every room and drop its queue.
    ///
    /// Rooms left empty are cleaned up.
    pub async fn detach(&self, connection: &ConnectionId) {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        if let Some(attached) = inner.connections.remove(connection) {
            for room in attached.rooms {
                remove_member(&mut inner.members, &room, connection);
            }
        }
    }

    /// Add a connection to a room, creating the room if needed.
    ///
    /// Returns false if the connection is not attached.
    pub async fn join(&self, connection: &ConnectionId, room: &str) -> bool {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let Some(attached) = inner.connections.get_mut(connection) else {
            return false;
        };
        attached.rooms.insert(room.to_string());
        inner
            .members
            .entry(room.to_string())
            .or_default()
            .insert(*connection);
        true
    }

    /// Remove a connection from a room. Returns whether it was a member.
    pub async fn leave(&self, connection: &ConnectionId, room: &str) -> bool {
        let mut inner = self.inner.write().await;
        let was_member = match inner.connections.get_mut(connection) {
            Some(attached) => attached.rooms.remove(room),
            None => false,
        };
        if was_member {
            remove_member(&mut inner.members, room, connection);
        }
        was_member
    }

    /// Enqueue a message for every member of a room.
    ///
    /// Returns how many connections accepted it. An unknown room is a no-op.
    pub async fn emit_to_room(&self, room: &str, message: ServerMessage) -> usize {
        let inner = self.inner.read().await;
        let Some(members) = inner.members.get(room) else {
            return 0;
        };
        members
            .iter()
            .filter_map(|id| inner.connections.get(id).map(|c| (id, c)))
            .filter(|(id, c)| enqueue(id, &c.sender, message.clone()))
            .count()
    }

    /// Enqueue a message for every attached connection.
    pub async fn emit_all(&self, message: ServerMessage) -> usize {
        let inner = self.inner.read().await;
        inner
            .connections
            .iter()
            .filter(|(id, c)| enqueue(id, &c.sender, message.clone()))
            .count()
    }

    /// Enqueue a message for a single connection.
    pub async fn send_to(&self, connection: &ConnectionId, message: ServerMessage) -> bool {
        let inner = self.inner.read().await;
        match inner.connections.get(connection) {
            Some(c) => enqueue(connection, &c.sender, message),
            None => false,
        }
    }

    /// Number of connections in a room (0 if room doesn't exist).
    pub async fn room_size(&self, room: &str) -> usize {
        self.inner
            .read()
            .await
            .members
            .get(room)
            .map(|m| m.len())
            .unwrap_or(0)
    }

    /// Get all active room names (for monitoring/debugging).
    pub async fn active_rooms(&self) -> Vec<String> {
        self.inner.read().await.members.keys().cloned().collect()
    }

    /// Total count of attached connections.
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

fn remove_member(
    members: &mut HashMap<String, HashSet<ConnectionId>>,
    room: &str,
    connection: &ConnectionId,
) {
    if let Some(set) = members.get_mut(room) {
        set.remove(connection);
        if set.is_empty() {
            members.remove(room);
        }
    }
}

fn enqueue(
    connection: &ConnectionId,
    sender: &mpsc::Sender<ServerMessage>,
    message: ServerMessage,
) -> bool {
    match sender.try_send(message) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(dropped)) => {
            tracing::warn!(
                connection_id = %connection,
                event = dropped.event_name().unwrap_or("-"),
                "Outbound queue full, dropping message"
            );
            false
        }
        Err(mpsc::error::TrySendError::Closed(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_event() -> ServerMessage {
        ServerMessage::event("task:created", json!({"test": "data"}))
    }

    #[tokio::test]
    async fn join_creates_room_if_not_exists() {
        let manager = RoomManager::with_default_capacity();
        let conn = ConnectionId::new();
        let _rx = manager.attach(conn).await;

        assert!(manager.join(&conn, "user:a").await);

        assert_eq!(manager.active_rooms().await, vec!["user:a".to_string()]);
    }

    #[tokio::test]
    async fn join_requires_attached_connection() {
        let manager = RoomManager::with_default_capacity();
        assert!(!manager.join(&ConnectionId::new(), "user:a").await);
        assert!(manager.active_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn emit_to_room_reaches_every_member() {
        let manager = RoomManager::with_default_capacity();
        let (c1, c2, c3) = (ConnectionId::new(), ConnectionId::new(), ConnectionId::new());
        let mut rx1 = manager.attach(c1).await;
        let mut rx2 = manager.attach(c2).await;
        let mut rx3 = manager.attach(c3).await;
        manager.join(&c1, "project:7").await;
        manager.join(&c2, "project:7").await;

        let reached = manager.emit_to_room("project:7", test_event()).await;

        assert_eq!(reached, 2);
        assert_eq!(rx1.recv().await.unwrap(), test_event());
        assert_eq!(rx2.recv().await.unwrap(), test_event());
        assert!(rx3.try_recv().is_err());
    }

    #[tokio::test]
    async fn emit_to_unknown_room_is_noop() {
        let manager = RoomManager::with_default_capacity();
        assert_eq!(manager.emit_to_room("nobody", test_event()).await, 0);
    }

    #[tokio::test]
    async fn emit_all_reaches_connections_without_rooms() {
        let manager = RoomManager::with_default_capacity();
        let conn = ConnectionId::new();
        let mut rx = manager.attach(conn).await;

        assert_eq!(manager.emit_all(test_event()).await, 1);
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn leave_removes_membership_and_empty_room() {
        let manager = RoomManager::with_default_capacity();
        let conn = ConnectionId::new();
        let _rx = manager.attach(conn).await;
        manager.join(&conn, "project:7").await;

        assert!(manager.leave(&conn, "project:7").await);
        assert!(!manager.leave(&conn, "project:7").await);

        assert_eq!(manager.room_size("project:7").await, 0);
        assert!(manager.active_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn detach_cleans_up_all_rooms() {
        let manager = RoomManager::with_default_capacity();
        let conn = ConnectionId::new();
        let other = ConnectionId::new();
        let _rx = manager.attach(conn).await;
        let _rx_other = manager.attach(other).await;
        manager.join(&conn, "user:a").await;
        manager.join(&conn, "shared").await;
        manager.join(&other, "shared").await;

        manager.detach(&conn).await;

        assert_eq!(manager.connection_count().await, 1);
        assert_eq!(manager.room_size("shared").await, 1);
        assert_eq!(manager.room_size("user:a").await, 0);
    }

    #[tokio::test]
    async fn full_queue_drops_only_for_slow_connection() {
        let manager = RoomManager::new(1);
        let slow = ConnectionId::new();
        let fast = ConnectionId::new();
        let _slow_rx = manager.attach(slow).await;
        let mut fast_rx = manager.attach(fast).await;
        manager.join(&slow, "r").await;
        manager.join(&fast, "r").await;

        assert_eq!(manager.emit_to_room("r", test_event()).await, 2);
        fast_rx.recv().await.unwrap();

        // slow never drained its single slot
        assert_eq!(manager.emit_to_room("r", test_event()).await, 1);
        assert!(fast_rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn send_to_targets_single_connection() {
        let manager = RoomManager::with_default_capacity();
        let conn = ConnectionId::new();
        let mut rx = manager.attach(conn).await;

        assert!(manager.send_to(&conn, ServerMessage::pong()).await);
        assert!(matches!(rx.recv().await, Some(ServerMessage::Pong(_))));
        assert!(!manager.send_to(&ConnectionId::new(), ServerMessage::pong()).await);
    }
}
