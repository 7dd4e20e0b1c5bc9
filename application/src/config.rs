//! Application-level configuration.
//!
//! Settings consumed by the answer service adapter. Where they come from
//! (files, environment, flags) is an infrastructure concern.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint of the answer service when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/ask";

/// Answer service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// URL the question is POSTed to.
    pub endpoint: String,
    /// Maximum time to wait for a response. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ServiceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Set the timeout from an optional number of seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }
}
