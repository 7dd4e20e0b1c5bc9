//! Domain layer for hometown-chat
//!
//! This crate contains the core entities and value objects of a chat
//! session. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The ordered, append-only list of [`Message`]s exchanged during one
//! session. Insertion order is chronological order.
//!
//! ## Send cycle
//!
//! One accepted user question through to the single assistant-role entry
//! that resolves it. [`SessionState`] admits at most one cycle at a time:
//!
//! - **Idle**: a new question may be accepted
//! - **Awaiting**: a question is in flight, further submissions are rejected

pub mod core;
pub mod session;

// Re-export commonly used types
pub use core::{error::DomainError, question::Question};
pub use session::{
    entities::{Message, MessageId, Role},
    resolution::{CONNECTION_FAILED_TEXT, NO_DATA_TEXT, Resolution},
    state::{Phase, SessionState, SubmitRejection},
};
