//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for hometown-chat
#[derive(Parser, Debug)]
#[command(name = "hometown-chat")]
#[command(author, version, about = "Chat with a hometown knowledge service")]
#[command(long_about = r#"
hometown-chat sends your questions to an answer service and shows the replies
as a chat transcript. One question is in flight at a time.

Without a question argument an interactive chat screen opens. With a question
argument the answer is printed once and the program exits.

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. HOMETOWN_* environment variables         e.g. HOMETOWN_SERVICE__ENDPOINT
3. ./hometown.toml or ./.hometown.toml      Project-level config
4. ~/.config/hometown-chat/config.toml      Global config

Example:
  hometown-chat
  hometown-chat "When was the old mill built?"
  hometown-chat --endpoint http://10.0.0.5:5000/ask --timeout 30 "Who founded the town?"
"#)]
pub struct Cli {
    /// Ask a single question and print the answer (opens the chat screen when omitted)
    pub question: Option<String>,

    /// Answer service URL (overrides config)
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the thinking spinner and source listing
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether this invocation runs the interactive chat screen
    pub fn is_interactive(&self) -> bool {
        self.question.is_none()
    }
}
