//! Realtime delivery vocabulary shared by the gateway and its ingress.

mod fingerprint;
mod push_event;

pub use fingerprint::CredentialFingerprint;
pub use push_event::{push_event_name, user_room};
