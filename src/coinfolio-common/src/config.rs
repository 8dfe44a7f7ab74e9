//! Configuration loading.
//!
//! Configuration lives in `coinfolio.toml` inside the application home. Every
//! section and field is optional; anything missing falls back to defaults.
//!
//! ```toml
//! [history]
//! capacity = 100
//!
//! [display]
//! prompt = "coinfolio> "
//! color = "auto"
//!
//! [settings]
//! reporting_profile = "summary"
//!
//! [market]
//! online = true
//! quotes = { btc = 64000.0, eth = 3100.5 }
//!
//! [portfolio]
//! watchlist = ["btc"]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dirs::AppDirs;

/// Configuration file name.
pub const CONFIG_FILE: &str = "coinfolio.toml";

/// Environment variable for an explicit config file path.
pub const COINFOLIO_CONFIG_ENV: &str = "COINFOLIO_CONFIG";

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default interactive prompt.
pub const DEFAULT_PROMPT: &str = "coinfolio> ";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file parsed but holds values that cannot be used.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Color output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Automatically detect if output is a terminal
    #[default]
    Auto,
    /// Always output with colors
    Always,
    /// Never output with colors
    Never,
}

/// How much detail reports show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportingProfile {
    #[default]
    Summary,
    Detailed,
    Compact,
}

impl ReportingProfile {
    pub const ALL: [ReportingProfile; 3] = [Self::Summary, Self::Detailed, Self::Compact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Detailed => "detailed",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for ReportingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportingProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown reporting profile '{s}'")))
    }
}

/// `[history]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of remembered input lines.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub prompt: String,
    pub color: ColorMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            color: ColorMode::Auto,
        }
    }
}

/// `[settings]` section: initial values of user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub reporting_profile: ReportingProfile,
}

/// `[market]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Whether the price source is reachable.
    pub online: bool,
    /// Known USD quotes keyed by lowercase coin symbol.
    pub quotes: BTreeMap<String, f64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            online: true,
            quotes: BTreeMap::new(),
        }
    }
}

/// `[portfolio]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Coins tracked at startup.
    pub watchlist: Vec<String>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinfolioConfig {
    pub history: HistoryConfig,
    pub display: DisplayConfig,
    pub settings: SettingsConfig,
    pub market: MarketConfig,
    pub portfolio: PortfolioConfig,
}

impl CoinfolioConfig {
    /// Parse configuration from TOML text without validating it.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid(
                "history.capacity must be greater than zero".to_string(),
            ));
        }

        if let Some((coin, quote)) = self
            .market
            .quotes
            .iter()
            .find(|(_, q)| !q.is_finite() || **q < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "market.quotes.{coin} must be a non-negative number, got {quote}"
            )));
        }

        Ok(())
    }
}

/// Configuration together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: CoinfolioConfig,
    /// `None` when no file existed and defaults were used.
    pub source: Option<PathBuf>,
}

/// Pick the config file path.
///
/// Order: explicit path, `COINFOLIO_CONFIG`, `<home>/coinfolio.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(COINFOLIO_CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    AppDirs::new().map(|d| d.config_dir.join(CONFIG_FILE))
}

/// Load configuration.
///
/// An explicitly requested file must exist; a missing default file yields
/// defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = resolve_config_path(explicit) else {
        debug!("No home directory; using default configuration");
        return Ok(LoadedConfig {
            config: CoinfolioConfig::default(),
            source: None,
        });
    };

    if explicit.is_none() && !path.exists() {
        debug!(path = %path.display(), "Config file not found; using defaults");
        return Ok(LoadedConfig {
            config: CoinfolioConfig::default(),
            source: None,
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = CoinfolioConfig::from_toml_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    config.validate()?;

    debug!(path = %path.display(), "Loaded configuration");
    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}
