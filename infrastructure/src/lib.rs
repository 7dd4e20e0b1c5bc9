//! Infrastructure layer for hometown-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileOutputConfig, FileServiceConfig,
    FileTuiConfig, Severity,
};
pub use http::{HttpAnswerClient, HttpClientError};
