//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use coinfolio_common::ColorMode;

use super::styles::{AFTER_HELP, get_styles};

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Coinfolio - interactive coin portfolio shell
///
/// Reads commands from stdin. Run `help` inside the shell for the command list.
#[derive(Debug, Parser)]
#[command(name = "coinfolio")]
#[command(author, version)]
#[command(about = "Coinfolio - interactive coin portfolio shell", long_about = None)]
#[command(styles = get_styles(), after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run a command line and exit (repeatable, runs in order)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub commands: Vec<String>,

    /// Number of input lines kept in history
    #[arg(long = "history-size", value_name = "N")]
    pub history_size: Option<usize>,

    /// Interactive prompt text
    #[arg(long = "prompt", value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Color output mode
    #[arg(long = "color", value_enum)]
    pub color: Option<ColorMode>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', help_heading = "Debugging")]
    pub verbose: bool,

    /// Enable trace output (same as --log-level trace)
    #[arg(long = "trace", help_heading = "Debugging")]
    pub trace: bool,

    /// Set log verbosity level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        short = 'L',
        value_enum,
        default_value = "warn",
        help_heading = "Debugging"
    )]
    pub log_level: LogLevel,

    /// Enable debug mode: writes ALL trace-level logs to ./debug.txt
    #[arg(long = "debug", help_heading = "Debugging")]
    pub debug: bool,
}

impl Cli {
    /// Effective log level: `--trace`, then `--verbose`, then the given
    /// environment value, then `--log-level`.
    pub fn effective_log_level(&self, env_level: Option<&str>) -> LogLevel {
        if self.trace {
            LogLevel::Trace
        } else if self.verbose {
            LogLevel::Debug
        } else {
            env_level
                .and_then(LogLevel::from_str_loose)
                .unwrap_or(self.log_level)
        }
    }
}
