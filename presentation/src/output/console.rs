//! Console output formatter for one-shot answers

use colored::Colorize;
use hometown_domain::{Message, SubmitRejection};

/// Formats resolved exchanges for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one question and its resolved reply
    ///
    /// Sources are listed below the reply when the service reported any.
    pub fn format_exchange(question: &str, reply: &Message, sources: &[String]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n\n",
            "You:".cyan().bold(),
            question
        ));

        output.push_str(&format!(
            "{}\n{}\n",
            format!("{}:", reply.role().label()).green().bold(),
            reply.text()
        ));

        if !sources.is_empty() {
            output.push_str(&format!("\n{}\n", "Sources:".cyan().bold()));
            for source in sources {
                output.push_str(&format!("  {} {}\n", "*".dimmed(), source));
            }
        }

        output
    }

    /// Format only the reply text (for --quiet)
    pub fn format_reply_only(reply: &Message) -> String {
        reply.text().to_string()
    }

    /// Format a rejected submission
    pub fn format_rejection(rejection: SubmitRejection) -> String {
        format!("{} {}", "Nothing sent:".yellow().bold(), rejection)
    }
}
