//! WebSocket adapters for realtime notification push.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │           Delivery ingress (POST /websocket/notifications)           │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │ send_to_user
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        RealtimeGateway                               │
//! │   - Authenticates handshakes (TokenVerifier + rejection cache)       │
//! │   - Push API: user / users / room / broadcast                        │
//! └─────────────────────────────────────────────────────────────────────┘
//!             │ register / unregister                 │ emit
//!             ▼                                       ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────────────┐
//! │      SessionRegistry       │   │            RoomManager               │
//! │  user → connection         │   │  Room: user:alice   Room: project:7  │
//! │  fingerprint → rejected_at │   │  └── conn-1         ├── conn-1       │
//! └───────────────────────────┘   └─────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`rooms`] - Per-connection queues and room membership
//! - [`session_registry`] - Live sessions and the handshake rejection cache
//! - [`gateway`] - Handshake decisions and the push API
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod gateway;
pub mod handler;
pub mod messages;
pub mod rooms;
pub mod session_registry;

pub use gateway::{HandshakeRejection, OpenedSession, RealtimeGateway};
pub use handler::{
    extract_credential, websocket_router, ws_handler, HandshakeQuery, CLOSE_UNAUTHORIZED,
};
pub use messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, EventMessage, PongMessage, ServerMessage,
};
pub use rooms::RoomManager;
pub use session_registry::{SessionRegistry, SessionRegistryConfig};
