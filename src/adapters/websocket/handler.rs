//! WebSocket upgrade handler for realtime notification connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Authenticate the handshake credential
//! 2. Upgrade to WebSocket (rejected handshakes are closed right away)
//! 3. Register the session and join the user room
//! 4. Forward queued pushes and process client messages until disconnect
//! 5. Unregister the session

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header, HeaderMap},
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::domain::foundation::{ConnectionId, Timestamp, UserId};

use super::gateway::{OpenedSession, RealtimeGateway};
use super::messages::{ClientMessage, ConnectedMessage, ServerMessage};

/// Close code sent for every rejected handshake (policy violation).
pub const CLOSE_UNAUTHORIZED: u16 = 1008;

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct HandshakeQuery {
    pub token: Option<String>,
}

/// Pick the handshake credential: the `token` query parameter, else a
/// `Bearer` authorization header.
pub fn extract_credential(query: &HandshakeQuery, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<HandshakeQuery>,
    headers: HeaderMap,
    State(gateway): State<RealtimeGateway>,
) -> Response {
    let credential = extract_credential(&query, &headers);

    match gateway.authenticate(credential.as_deref()).await {
        Ok(user_id) => {
            tracing::info!(user_id = %user_id, "WebSocket connection authenticated");
            ws.on_upgrade(move |socket| handle_socket(socket, user_id, gateway))
        }
        Err(reason) => {
            tracing::warn!(reason = %reason, "WebSocket handshake rejected");
            ws.on_upgrade(|mut socket| async move {
                let frame = CloseFrame {
                    code: CLOSE_UNAUTHORIZED,
                    reason: "Unauthorized".into(),
                };
                let _ = socket.send(Message::Close(Some(frame))).await;
            })
        }
    }
}

/// Handle an established, authenticated WebSocket connection.
async fn handle_socket(socket: WebSocket, user_id: UserId, gateway: RealtimeGateway) {
    let (mut sender, mut receiver) = socket.split();

    let OpenedSession {
        connection_id,
        mut outbound,
    } = gateway.open_session(&user_id).await;

    let connected = ServerMessage::Connected(ConnectedMessage {
        connection_id: connection_id.to_string(),
        user_id: user_id.to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    });

    if let Err(e) = send_message(&mut sender, &connected).await {
        tracing::debug!("Failed to send connected message: {}", e);
        gateway.close_session(&user_id, &connection_id).await;
        return;
    }

    // Forward queued messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbound.recv().await {
            if let Err(e) = send_message(&mut sender, &msg).await {
                tracing::debug!(
                    connection_id = %connection_id,
                    "Send error, closing connection: {}",
                    e
                );
                break;
            }
        }
    });

    // Handle incoming messages from client
    let recv_gateway = gateway.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    handle_client_text(&recv_gateway, &connection_id, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "Received unsupported binary message"
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level heartbeats are answered by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    gateway.close_session(&user_id, &connection_id).await;
    tracing::info!(user_id = %user_id, connection_id = %connection_id, "WebSocket disconnected");
}

async fn handle_client_text(gateway: &RealtimeGateway, connection_id: &ConnectionId, text: &str) {
    let reply = match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::JoinRoom { room }) => {
            gateway.join_room(connection_id, &room).await;
            tracing::debug!(connection_id = %connection_id, room = %room, "Joined room");
            None
        }
        Ok(ClientMessage::LeaveRoom { room }) => {
            gateway.leave_room(connection_id, &room).await;
            tracing::debug!(connection_id = %connection_id, room = %room, "Left room");
            None
        }
        Ok(ClientMessage::Ping) => Some(ServerMessage::pong()),
        Err(e) => {
            tracing::debug!(connection_id = %connection_id, "Unparseable client message: {}", e);
            Some(ServerMessage::error("BAD_MESSAGE", "Unrecognized message"))
        }
    };

    if let Some(reply) = reply {
        gateway.rooms().send_to(connection_id, reply).await;
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<RealtimeGateway> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn query(token: Option<&str>) -> HandshakeQuery {
        HandshakeQuery {
            token: token.map(str::to_string),
        }
    }

    fn bearer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn query_token_wins_over_header() {
        let credential = extract_credential(&query(Some("q")), &bearer("Bearer h"));
        assert_eq!(credential.as_deref(), Some("q"));
    }

    #[test]
    fn falls_back_to_bearer_header() {
        let credential = extract_credential(&query(None), &bearer("Bearer h"));
        assert_eq!(credential.as_deref(), Some("h"));
    }

    #[test]
    fn empty_query_token_falls_back_to_header() {
        let credential = extract_credential(&query(Some("")), &bearer("Bearer h"));
        assert_eq!(credential.as_deref(), Some("h"));
    }

    #[test]
    fn non_bearer_header_is_ignored() {
        assert_eq!(extract_credential(&query(None), &bearer("Basic abc")), None);
        assert_eq!(extract_credential(&query(None), &HeaderMap::new()), None);
    }

    #[test]
    fn websocket_router_creates_route() {
        let _router = websocket_router();
    }
}
