//! Answer service configuration from TOML (`[service]` section)

use super::validation::{ConfigIssue, ConfigIssueCode};
use hometown_application::{DEFAULT_ENDPOINT, ServiceConfig};
use serde::{Deserialize, Serialize};

/// Raw answer service configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServiceConfig {
    /// URL the question is POSTed to
    pub endpoint: String,
    /// Request timeout in seconds (unset = transport default)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

impl FileServiceConfig {
    /// Convert to the application-level service config
    pub fn to_service_config(&self) -> ServiceConfig {
        ServiceConfig::new(self.endpoint.trim()).with_timeout_seconds(self.timeout_seconds)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let endpoint = self.endpoint.trim();

        if endpoint.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyEndpoint,
                "service.endpoint is empty; every send will fail",
            ));
        } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnsupportedScheme,
                format!(
                    "service.endpoint '{}' is not an http(s) URL; sends will fail",
                    endpoint
                ),
            ));
        }

        if self.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "service.timeout_seconds = 0 times out every request; remove it to disable",
            ));
        }

        issues
    }
}
