//! Chat session domain.
//!
//! - [`entities::Message`] - a single immutable transcript entry
//! - [`state::SessionState`] - transcript, composing text and busy flag
//! - [`resolution::Resolution`] - classified outcome of one send cycle

pub mod entities;
pub mod resolution;
pub mod state;
