//! Help output styling.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Coinfolio help theme.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section documenting the environment.
pub const AFTER_HELP: &str = "\
Examples:
    coinfolio                                  Start the interactive shell
    coinfolio -c 'market price btc eth'        Run one command and exit
    echo 'portfolio list' | coinfolio          Read commands from a pipe

Environment variables:
    COINFOLIO_HOME        Override the home directory (default: ~/.coinfolio)
    COINFOLIO_CONFIG      Path to the configuration file
    COINFOLIO_LOG_LEVEL   Log verbosity (error, warn, info, debug, trace)
    NO_COLOR              Disable colored output";
