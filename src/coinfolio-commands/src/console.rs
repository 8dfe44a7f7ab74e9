//! Output sink handed to commands and constraints.

use std::fmt;

/// Kind of message written to a [`Console`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Regular command output (tables, listings).
    Output,
    /// Confirmation that something happened.
    Notice,
    /// Something the user should know about but which did not fail.
    Warning,
    /// A diagnostic for a failed dispatch.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for user-facing messages.
///
/// Passed explicitly through [`CommandContext`](crate::CommandContext) so the
/// engine never writes to a global terminal.
pub trait Console {
    /// Write one message.
    fn emit(&mut self, severity: Severity, message: &str);

    fn output(&mut self, message: &str) {
        self.emit(Severity::Output, message);
    }

    fn notice(&mut self, message: &str) {
        self.emit(Severity::Notice, message);
    }

    fn warning(&mut self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.emit(Severity::Error, message);
    }
}

/// A message captured by [`BufferConsole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub severity: Severity,
    pub text: String,
}

/// Console that records every message in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    messages: Vec<ConsoleMessage>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages in emission order.
    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }

    /// Text of every message with the given severity.
    pub fn texts(&self, severity: Severity) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .map(|m| m.text.as_str())
            .collect()
    }

    /// Text of every error message.
    pub fn errors(&self) -> Vec<&str> {
        self.texts(Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Console for BufferConsole {
    fn emit(&mut self, severity: Severity, message: &str) {
        self.messages.push(ConsoleMessage {
            severity,
            text: message.to_string(),
        });
    }
}
