//! TUI configuration from TOML (`[tui]` section)

use super::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw TUI configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTuiConfig {
    /// Redraw interval, drives the thinking indicator animation
    pub tick_millis: u64,
    /// Show the key hint line in the status bar
    pub show_help_hint: bool,
}

impl Default for FileTuiConfig {
    fn default() -> Self {
        Self {
            tick_millis: 250,
            show_help_hint: true,
        }
    }
}

impl FileTuiConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        if self.tick_millis == 0 {
            vec![ConfigIssue::warning(
                ConfigIssueCode::ZeroTick,
                "tui.tick_millis = 0 is too fast; using 250",
            )]
        } else {
            Vec::new()
        }
    }

    /// Tick interval with the zero case clamped back to the default
    pub fn tick_millis_or_default(&self) -> u64 {
        if self.tick_millis == 0 {
            Self::default().tick_millis
        } else {
            self.tick_millis
        }
    }
}
