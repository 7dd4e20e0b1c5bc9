//! CLI entrypoint for hometown-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use hometown_application::{SendController, ServiceConfig, SubmitOutcome};
use hometown_infrastructure::{ConfigLoader, FileConfig, HttpAnswerClient, Severity};
use hometown_presentation::{Cli, ConsoleFormatter, ThinkingSpinner, TuiApp, TuiOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Exit code when the answer service could not be reached
const EXIT_REQUEST_FAILED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::config_sources() {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    info!("Starting hometown-chat");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    report_config_issues(&file_config);

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let service_config = service_config(&cli, &file_config);
    info!("Answer service endpoint: {}", service_config.endpoint);

    // === Dependency Injection ===
    let client = HttpAnswerClient::new(&service_config).context("Failed to build HTTP client")?;
    let controller = SendController::new(Arc::new(client));

    match cli.question.as_deref() {
        Some(question) => {
            run_one_shot(controller, question, &service_config.endpoint, cli.quiet).await
        }
        None => {
            let options = TuiOptions {
                tick: Duration::from_millis(file_config.tui.tick_millis_or_default()),
                show_help_hint: file_config.tui.show_help_hint,
                endpoint: service_config.endpoint.clone(),
            };
            let mut app = TuiApp::new(controller, options);
            app.run().await.context("Chat screen failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize tracing
///
/// One-shot mode logs to stderr. The chat screen owns the terminal, so
/// it logs to `$XDG_DATA_HOME/hometown-chat/logs/hometown-chat.log`.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if !cli.is_interactive() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let Some(log_dir) = log_dir() else {
        // Nowhere to write; stay silent rather than draw over the screen
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::never(&log_dir, "hometown-chat.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("hometown-chat").join("logs"))
}

/// Log config issues; none of them stop startup
fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

/// File config with `--endpoint` / `--timeout` applied on top
fn service_config(cli: &Cli, file_config: &FileConfig) -> ServiceConfig {
    let mut config = file_config.service.to_service_config();
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.trim().to_string();
    }
    if cli.timeout.is_some() {
        config = config.with_timeout_seconds(cli.timeout);
    }
    config
}

/// Ask a single question, print the reply and exit
async fn run_one_shot(
    mut controller: SendController,
    question: &str,
    endpoint: &str,
    quiet: bool,
) -> Result<ExitCode> {
    controller.set_composing_text(question);
    if let SubmitOutcome::Rejected(rejection) = controller.submit() {
        eprintln!("{}", ConsoleFormatter::format_rejection(rejection));
        return Ok(ExitCode::FAILURE);
    }

    let spinner = if quiet {
        ThinkingSpinner::hidden()
    } else {
        ThinkingSpinner::start(endpoint)
    };

    let completion = controller
        .next_completion()
        .await
        .context("Request task ended without reporting back")?;
    // A malformed body still resolves to an answer ("No data found")
    let failed = matches!(completion.result(), Err(e) if !e.is_malformed_payload());
    let reply = controller.resolve(completion)?;
    spinner.finish(failed);

    let output = if quiet {
        ConsoleFormatter::format_reply_only(&reply)
    } else {
        ConsoleFormatter::format_exchange(question, &reply, controller.last_sources())
    };
    println!("{}", output);

    if failed {
        Ok(ExitCode::from(EXIT_REQUEST_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
