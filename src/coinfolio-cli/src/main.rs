//! Coinfolio CLI - Main entry point.
//!
//! Parses arguments, initialises logging and hands over to the session.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use coinfolio_cli::cli::{Cli, run_cli};

/// Environment variable selecting the log level.
const LOG_LEVEL_ENV: &str = "COINFOLIO_LOG_LEVEL";

/// Guard that ensures debug log file is properly flushed when dropped.
struct DebugLogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Set up debug file logging that writes ALL trace-level logs to ./debug.txt.
fn setup_debug_file_logging() -> Result<DebugLogGuard> {
    use std::fs::File;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let debug_file_path = std::env::current_dir()?.join("debug.txt");

    let file = File::create(&debug_file_path).map_err(|e| {
        anyhow::anyhow!("Failed to create debug.txt: {e}. Check write permissions.")
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("trace"))
        .with(file_layer)
        .init();

    eprintln!(
        "Debug mode enabled: logging to {}",
        debug_file_path.display()
    );

    Ok(DebugLogGuard { _guard: guard })
}

/// Log to stderr so diagnostics never mix with command output.
fn setup_stderr_logging(cli: &Cli) {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let log_level = cli.effective_log_level(env_level.as_deref());

    // RUST_LOG, when set, takes over entirely.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _debug_guard = if cli.debug {
        Some(setup_debug_file_logging()?)
    } else {
        setup_stderr_logging(&cli);
        None
    };

    run_cli(cli)
}
