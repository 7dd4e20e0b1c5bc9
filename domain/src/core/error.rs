//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are programming errors, not user-facing failures: user-facing
/// failures are recorded in the transcript as assistant messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resolution applied while no send cycle is in flight")]
    NotAwaiting,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}
