//! Common utilities shared across Coinfolio crates.

pub mod ansi;
pub mod config;
pub mod dirs;

pub use ansi::{colors as ansi_colors, paint, should_colorize, should_colorize_stderr};
pub use config::{
    CONFIG_FILE, COINFOLIO_CONFIG_ENV, CoinfolioConfig, ColorMode, ConfigError, DisplayConfig,
    HistoryConfig, LoadedConfig, MarketConfig, PortfolioConfig, ReportingProfile,
    SettingsConfig, load_config, resolve_config_path,
};
pub use dirs::{AppDirs, COINFOLIO_HOME_ENV};
