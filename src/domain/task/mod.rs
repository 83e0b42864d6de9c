//! Task domain module.
//!
//! Tasks and comments are owned by the task service. This crate only sees
//! them as snapshots embedded in broker events.

mod events;

pub use events::{
    CommentSnapshot, DomainEvent, EventEnvelope, EventKind, TaskSnapshot, UserRef,
};
