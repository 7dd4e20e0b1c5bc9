//! Thinking spinner shown while a one-shot question is in flight

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner tied to a single send cycle
pub struct ThinkingSpinner {
    bar: ProgressBar,
}

impl ThinkingSpinner {
    /// Start spinning with the endpoint shown as context
    pub fn start(endpoint: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::style());
        bar.set_prefix("thinking");
        bar.set_message(endpoint.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Spinner that draws nothing (for --quiet)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Stop and clear the spinner line
    pub fn finish(self, failed: bool) {
        if failed {
            self.bar
                .finish_with_message(format!("{}", "request failed".red()));
        } else {
            self.bar.finish_and_clear();
        }
    }
}
