//! Configuration file loading for hometown-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Environment: `HOMETOWN_SERVICE__ENDPOINT`, `HOMETOWN_TUI__TICK_MILLIS`, ...
//! 3. Project root: `./hometown.toml` or `./.hometown.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/hometown-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileOutputConfig, FileServiceConfig, FileTuiConfig,
    Severity,
};
pub use loader::ConfigLoader;
