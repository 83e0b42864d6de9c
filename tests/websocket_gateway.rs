//! Integration tests for the realtime gateway over real sockets.
//!
//! A gateway is served on an ephemeral loopback port and driven with a
//! tokio-tungstenite client: handshake acceptance and rejection, the
//! rejection cache, push through the HTTP ingress, and disconnect cleanup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use task_notifier::adapters::auth::MockTokenVerifier;
use task_notifier::adapters::http::realtime_routes;
use task_notifier::adapters::websocket::{
    websocket_router, RealtimeGateway, RoomManager, SessionRegistry, CLOSE_UNAUTHORIZED,
};
use task_notifier::domain::foundation::{AuthError, UserId};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestGateway {
    addr: SocketAddr,
    gateway: RealtimeGateway,
    verifier: Arc<MockTokenVerifier>,
}

impl TestGateway {
    async fn start() -> Self {
        let verifier = Arc::new(
            MockTokenVerifier::new()
                .with_user("alice-token", "alice")
                .with_user("bob-token", "bob")
                .with_error("stale-token", AuthError::TokenExpired),
        );
        let gateway = RealtimeGateway::new(
            Arc::new(SessionRegistry::default()),
            Arc::new(RoomManager::with_default_capacity()),
            verifier.clone(),
        );

        let app = websocket_router()
            .merge(realtime_routes())
            .with_state(gateway.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            gateway,
            verifier,
        }
    }

    async fn connect(&self, token: Option<&str>) -> Client {
        let url = match token {
            Some(token) => format!("ws://{}/ws?token={}", self.addr, token),
            None => format!("ws://{}/ws", self.addr),
        };
        let (client, _) = connect_async(url).await.expect("upgrade should succeed");
        client
    }

    async fn push(&self, user_id: &str, kind: &str) -> reqwest::StatusCode {
        reqwest::Client::new()
            .post(format!("http://{}/websocket/notifications", self.addr))
            .json(&json!({
                "userId": user_id,
                "type": kind,
                "notifications": [{"id": "n-1", "title": "New task assigned"}],
            }))
            .send()
            .await
            .unwrap()
            .status()
    }
}

async fn next_message(client: &mut Client) -> Message {
    tokio::time::timeout(Duration::from_secs(2), client.next())
        .await
        .expect("timed out waiting for a message")
        .expect("stream ended")
        .expect("websocket error")
}

async fn next_json(client: &mut Client) -> Value {
    match next_message(client).await {
        Message::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

async fn expect_policy_close(client: &mut Client) {
    match next_message(client).await {
        Message::Close(Some(frame)) => assert_eq!(u16::from(frame.code), CLOSE_UNAUTHORIZED),
        other => panic!("expected close frame, got {other:?}"),
    }
}

// =============================================================================
// Handshake
// =============================================================================

#[tokio::test]
async fn valid_token_receives_connected_message() {
    let server = TestGateway::start().await;

    let mut client = server.connect(Some("alice-token")).await;
    let connected = next_json(&mut client).await;

    assert_eq!(connected["type"], "connected");
    assert_eq!(connected["userId"], "alice");
    assert!(connected["connectionId"].as_str().is_some());
    assert!(
        server
            .gateway
            .is_user_connected(&UserId::new("alice").unwrap())
            .await
    );
}

#[tokio::test]
async fn missing_token_is_closed_with_policy_violation() {
    let server = TestGateway::start().await;

    let mut client = server.connect(None).await;

    expect_policy_close(&mut client).await;
    assert_eq!(server.verifier.call_count(), 0);
}

#[tokio::test]
async fn unknown_token_is_closed_with_policy_violation() {
    let server = TestGateway::start().await;

    let mut client = server.connect(Some("forged")).await;

    expect_policy_close(&mut client).await;
    assert_eq!(server.gateway.connected_user_count().await, 0);
}

#[tokio::test]
async fn expired_token_is_throttled_on_retry() {
    let server = TestGateway::start().await;

    let mut first = server.connect(Some("stale-token")).await;
    expect_policy_close(&mut first).await;
    assert_eq!(server.verifier.call_count(), 1);

    let mut second = server.connect(Some("stale-token")).await;
    expect_policy_close(&mut second).await;
    assert_eq!(server.verifier.call_count(), 1, "throttled retry must skip verification");
}

// =============================================================================
// Push
// =============================================================================

#[tokio::test]
async fn ingress_push_reaches_only_the_target_user() {
    let server = TestGateway::start().await;
    let mut alice = server.connect(Some("alice-token")).await;
    let mut bob = server.connect(Some("bob-token")).await;
    next_json(&mut alice).await;
    next_json(&mut bob).await;

    let status = server.push("alice", "TASK_CREATED").await;
    assert!(status.is_success());

    let pushed = next_json(&mut alice).await;
    assert_eq!(pushed["type"], "event");
    assert_eq!(pushed["event"], "task:created");
    assert_eq!(pushed["data"]["type"], "TASK_CREATED");
    assert_eq!(pushed["data"]["notifications"][0]["id"], "n-1");

    // Bob's next message is the pong to his own ping, not alice's push.
    bob.send(Message::Text(r#"{"type":"ping"}"#.to_string()))
        .await
        .unwrap();
    assert_eq!(next_json(&mut bob).await["type"], "pong");
}

#[tokio::test]
async fn push_to_offline_user_succeeds_silently() {
    let server = TestGateway::start().await;

    let status = server.push("nobody", "TASK_UPDATED").await;

    assert!(status.is_success());
}

#[tokio::test]
async fn unknown_kind_uses_generic_event_name() {
    let server = TestGateway::start().await;
    let mut alice = server.connect(Some("alice-token")).await;
    next_json(&mut alice).await;

    server.push("alice", "SYSTEM").await;

    assert_eq!(next_json(&mut alice).await["event"], "notification");
}

// =============================================================================
// Rooms
// =============================================================================

/// Sends a client frame and waits for a pong, so the frame has been handled.
async fn send_and_sync(client: &mut Client, frame: Value) {
    client.send(Message::Text(frame.to_string())).await.unwrap();
    client
        .send(Message::Text(json!({"type": "ping"}).to_string()))
        .await
        .unwrap();
    assert_eq!(next_json(client).await["type"], "pong");
}

#[tokio::test]
async fn join_and_leave_room_control_room_delivery() {
    let server = TestGateway::start().await;
    let mut alice = server.connect(Some("alice-token")).await;
    next_json(&mut alice).await;

    send_and_sync(&mut alice, json!({"type": "join-room", "room": "project:7"})).await;

    let reached = server
        .gateway
        .send_to_room("project:7", "project:updated", json!({"projectId": 7}))
        .await;
    assert_eq!(reached, 1);
    let pushed = next_json(&mut alice).await;
    assert_eq!(pushed["type"], "event");
    assert_eq!(pushed["event"], "project:updated");
    assert_eq!(pushed["data"]["projectId"], 7);

    send_and_sync(&mut alice, json!({"type": "leave-room", "room": "project:7"})).await;

    let reached = server
        .gateway
        .send_to_room("project:7", "project:updated", json!({"projectId": 7}))
        .await;
    assert_eq!(reached, 0);
}

#[tokio::test]
async fn unrecognized_client_message_gets_error_frame() {
    let server = TestGateway::start().await;
    let mut alice = server.connect(Some("alice-token")).await;
    next_json(&mut alice).await;

    alice
        .send(Message::Text(json!({"type": "subscribe"}).to_string()))
        .await
        .unwrap();

    let reply = next_json(&mut alice).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["code"], "BAD_MESSAGE");
}

// =============================================================================
// Disconnect
// =============================================================================

#[tokio::test]
async fn closing_the_socket_unregisters_the_session() {
    let server = TestGateway::start().await;
    let alice_id = UserId::new("alice").unwrap();
    let mut alice = server.connect(Some("alice-token")).await;
    next_json(&mut alice).await;
    assert!(server.gateway.is_user_connected(&alice_id).await);

    alice.close(None).await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while server.gateway.is_user_connected(&alice_id).await {
        assert!(
            tokio::time::Instant::now() < deadline,
            "session still registered after close"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
