//! TUI (Text User Interface) chat screen for hometown-chat
//!
//! A single screen built on ratatui: the transcript, one input line and
//! a status bar. The screen forwards two intents to the send controller
//! (text changed, submit) and renders whatever the session holds.

mod app;
mod keys;
mod state;
mod widgets;

pub use app::{TuiApp, TuiOptions};
pub use keys::{Action, KeyHandler};
pub use state::TuiState;
