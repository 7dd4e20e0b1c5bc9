//! Application layer for hometown-chat
//!
//! This crate contains the send controller use case, the answer service
//! port and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_ENDPOINT, ServiceConfig};
pub use ports::answer_service::{Answer, AnswerError, AnswerService};
pub use use_cases::send_controller::{
    Completion, ControllerError, CycleId, SendController, SubmitOutcome,
};
