//! ANSI colour helpers.
//!
//! Colours are only emitted when the target stream is a terminal and the
//! `NO_COLOR` environment variable is unset (https://no-color.org/).

use std::io::IsTerminal;

/// Check if stdout should output colors/ANSI codes.
pub fn should_colorize() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Check if stderr should output colors/ANSI codes.
pub fn should_colorize_stderr() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

/// Wrap `text` in `color` when `enabled`, otherwise return it unchanged.
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{}", colors::RESET)
    } else {
        text.to_string()
    }
}

/// ANSI color codes for common colors.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const GREEN: &str = "\x1b[32m";

    pub const BOLD_RED: &str = "\x1b[1;31m";
    pub const BOLD_YELLOW: &str = "\x1b[1;33m";
}
