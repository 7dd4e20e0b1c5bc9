//! Presentation layer for hometown-chat
//!
//! This crate contains the CLI definition, the one-shot output
//! formatter and spinner, and the interactive chat screen.

pub mod cli;
pub mod output;
pub mod progress;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::ThinkingSpinner;
pub use tui::{TuiApp, TuiOptions};
