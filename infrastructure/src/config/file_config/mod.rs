//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to their defaults.

mod output;
mod service;
mod tui;
mod validation;

pub use output::FileOutputConfig;
pub use service::FileServiceConfig;
pub use tui::FileTuiConfig;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Answer service connection settings
    pub service: FileServiceConfig,
    /// TUI settings
    pub tui: FileTuiConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Issues never abort startup; the caller reports them and carries on
    /// with whatever values were loaded.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.service.validate());
        issues.extend(self.tui.validate());
        issues
    }
}
