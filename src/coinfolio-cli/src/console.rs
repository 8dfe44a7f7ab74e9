//! Terminal console.

use std::io::{self, Write};

use coinfolio_commands::{Console, Severity};
use coinfolio_common::{ColorMode, ansi_colors, paint, should_colorize, should_colorize_stderr};

/// Console writing output and notices to one stream and diagnostics to another.
pub struct StdConsole<O: Write, E: Write> {
    out: O,
    err: E,
    color_out: bool,
    color_err: bool,
}

impl StdConsole<io::Stdout, io::Stderr> {
    /// Console over the process's stdout and stderr.
    pub fn stdio(mode: ColorMode) -> Self {
        let (color_out, color_err) = match mode {
            ColorMode::Always => (true, true),
            ColorMode::Never => (false, false),
            ColorMode::Auto => (should_colorize(), should_colorize_stderr()),
        };
        Self::with_writers(io::stdout(), io::stderr(), color_out, color_err)
    }
}

impl<O: Write, E: Write> StdConsole<O, E> {
    pub fn with_writers(out: O, err: E, color_out: bool, color_err: bool) -> Self {
        Self {
            out,
            err,
            color_out,
            color_err,
        }
    }

    /// Write the prompt without a trailing newline.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Console for StdConsole<O, E> {
    fn emit(&mut self, severity: Severity, message: &str) {
        // Nothing sensible to do if the terminal is gone.
        let _ = match severity {
            Severity::Output => writeln!(self.out, "{message}"),
            Severity::Notice => writeln!(
                self.out,
                "{}",
                paint(message, ansi_colors::GREEN, self.color_out)
            ),
            Severity::Warning => writeln!(
                self.err,
                "{} {message}",
                paint("warning:", ansi_colors::BOLD_YELLOW, self.color_err)
            ),
            Severity::Error => writeln!(
                self.err,
                "{} {message}",
                paint("error:", ansi_colors::BOLD_RED, self.color_err)
            ),
        };
    }
}
