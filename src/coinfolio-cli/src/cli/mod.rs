//! CLI argument parsing and startup.
//!
//! - `args` - Command-line argument structures
//! - `styles` - ANSI styling for help output

pub mod args;
pub mod styles;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use coinfolio_commands::CommandHistory;
use coinfolio_common::{CoinfolioConfig, load_config};
use tracing::{debug, info};

pub use args::{Cli, LogLevel};
pub use styles::{AFTER_HELP, get_styles};

use crate::console::StdConsole;
use crate::executors::build_dispatcher;
use crate::services::Services;
use crate::session::Session;

/// Settings after applying CLI overrides to the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub config: CoinfolioConfig,
}

impl RunSettings {
    pub fn resolve(cli: &Cli, mut config: CoinfolioConfig) -> Result<Self> {
        if let Some(size) = cli.history_size {
            config.history.capacity = size;
        }
        if let Some(prompt) = &cli.prompt {
            config.display.prompt = prompt.clone();
        }
        if let Some(color) = cli.color {
            config.display.color = color;
        }
        config
            .validate()
            .context("Invalid settings after applying command-line overrides")?;
        Ok(Self { config })
    }
}

/// Build the session and run it to completion.
///
/// With `--command` lines the session runs them and exits with status 1 if any
/// of them did not succeed. Otherwise lines are read from stdin until EOF or
/// `exit`.
pub fn run_cli(cli: Cli) -> Result<ExitCode> {
    let loaded = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &loaded.source {
        info!(path = %path.display(), "Using configuration file");
    }
    let settings = RunSettings::resolve(&cli, loaded.config)?;
    let config = &settings.config;

    let services = Services::from_config(config);
    let dispatcher =
        build_dispatcher(&services).context("Failed to register commands at startup")?;
    let history = CommandHistory::with_capacity(config.history.capacity)
        .context("Failed to create command history")?;
    let console = StdConsole::stdio(config.display.color);
    let mut session = Session::new(dispatcher, history, console);

    if !cli.commands.is_empty() {
        debug!(count = cli.commands.len(), "Running command-line lines");
        let summary = session.run_lines(cli.commands.as_slice());
        return Ok(if summary.all_succeeded() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let stdin = io::stdin();
    let prompt = stdin
        .is_terminal()
        .then_some(config.display.prompt.as_str());
    session
        .run(stdin.lock(), prompt)
        .context("Failed to read input")?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use coinfolio_common::ColorMode;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "coinfolio",
            "--history-size",
            "3",
            "--prompt",
            "> ",
            "--color",
            "always",
        ])
        .unwrap();

        let settings = RunSettings::resolve(&cli, CoinfolioConfig::default()).unwrap();
        assert_eq!(settings.config.history.capacity, 3);
        assert_eq!(settings.config.display.prompt, "> ");
        assert_eq!(settings.config.display.color, ColorMode::Always);
    }

    #[test]
    fn test_config_kept_without_overrides() {
        let cli = Cli::try_parse_from(["coinfolio"]).unwrap();
        let mut config = CoinfolioConfig::default();
        config.history.capacity = 42;

        let settings = RunSettings::resolve(&cli, config.clone()).unwrap();
        assert_eq!(settings.config, config);
    }

    #[test]
    fn test_zero_history_size_rejected() {
        let cli = Cli::try_parse_from(["coinfolio", "--history-size", "0"]).unwrap();
        assert!(RunSettings::resolve(&cli, CoinfolioConfig::default()).is_err());
    }

    #[test]
    fn test_run_cli_with_failing_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coinfolio.toml");
        std::fs::write(&path, "[market]\nonline = false\n").unwrap();

        let cli = Cli::try_parse_from([
            "coinfolio",
            "--config",
            path.to_str().unwrap(),
            "--color",
            "never",
            "-c",
            "market price btc",
        ])
        .unwrap();

        assert_eq!(run_cli(cli).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_run_cli_with_succeeding_command_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coinfolio.toml");
        std::fs::write(&path, "[portfolio]\nwatchlist = [\"btc\"]\n").unwrap();

        let cli = Cli::try_parse_from([
            "coinfolio",
            "--config",
            path.to_str().unwrap(),
            "-c",
            "portfolio untrack btc",
            "-c",
            "portfolio list",
        ])
        .unwrap();

        assert_eq!(run_cli(cli).unwrap(), ExitCode::SUCCESS);
    }
}
