//! Application directories for Coinfolio.
//!
//! Defaults to `~/.coinfolio` and can be overridden with `COINFOLIO_HOME`.

use std::path::PathBuf;

use tracing::debug;

/// Primary home directory name.
pub const HOME_DIR_NAME: &str = ".coinfolio";

/// Environment variable overriding the home directory.
pub const COINFOLIO_HOME_ENV: &str = "COINFOLIO_HOME";

/// Application directories structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Directory holding `coinfolio.toml`.
    pub config_dir: PathBuf,
}

impl AppDirs {
    /// Resolve directories, honouring `COINFOLIO_HOME`.
    ///
    /// Relative overrides are resolved against the current directory.
    pub fn new() -> Option<Self> {
        if let Some(home) = std::env::var_os(COINFOLIO_HOME_ENV).filter(|v| !v.is_empty()) {
            let home = PathBuf::from(home);
            let home = if home.is_relative() {
                std::env::current_dir().ok()?.join(home)
            } else {
                home
            };
            debug!(path = %home.display(), "Using COINFOLIO_HOME");
            return Some(Self { config_dir: home });
        }

        let config_dir = dirs::home_dir()?.join(HOME_DIR_NAME);
        Some(Self { config_dir })
    }
}
