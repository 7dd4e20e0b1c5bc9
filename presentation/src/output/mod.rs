//! Output formatting for one-shot mode

pub mod console;
