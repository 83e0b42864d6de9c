//! Delivery adapters.
//!
//! - **HttpDeliveryBridge** - POSTs push requests to the gateway ingress
//! - **RecordingDelivery** - Records calls (testing)

mod http_bridge;
mod mock;

pub use http_bridge::{HttpDeliveryBridge, HttpDeliveryConfig, DEFAULT_GATEWAY_URL};
pub use mock::{DeliveryCall, RecordingDelivery};
