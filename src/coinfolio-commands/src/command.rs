//! Command capability and its fixed signature.

use std::fmt;

use thiserror::Error;

use crate::console::Console;
use crate::constraint::ArgumentConstraint;
use crate::dispatcher::CatalogEntry;
use crate::history::CommandHistory;
use crate::prefix::Prefix;

/// Unrecoverable failure raised from inside a command.
///
/// Expected failures (a missing quote, an offline collaborator) are reported
/// on the console and signalled by returning `Ok(false)` instead.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A collaborator or the command itself is in a state it cannot recover from.
    #[error("Invalid internal state: {0}")]
    InvalidState(String),
}

/// Address, argument constraints and help text of a command.
///
/// Built once when the command is constructed and never mutated afterwards.
#[derive(Debug)]
pub struct CommandSignature {
    prefix: Prefix,
    constraints: Vec<Box<dyn ArgumentConstraint>>,
    description: String,
    arguments: Option<String>,
}

impl CommandSignature {
    pub fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            constraints: Vec::new(),
            description: String::new(),
            arguments: None,
        }
    }

    /// Append a constraint. Constraints are checked in the order added.
    pub fn constraint(mut self, constraint: impl ArgumentConstraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Set the one-line description shown in help.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the argument hint shown after the prefix in usage, e.g. `<coin>`.
    pub fn arguments(mut self, hint: impl Into<String>) -> Self {
        self.arguments = Some(hint.into());
        self
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn constraints(&self) -> &[Box<dyn ArgumentConstraint>] {
        &self.constraints
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Prefix followed by the argument hint, if any.
    pub fn usage(&self) -> String {
        match &self.arguments {
            Some(hint) => format!("{} {hint}", self.prefix),
            None => self.prefix.to_string(),
        }
    }
}

/// An addressable unit of behavior.
pub trait Command {
    /// Fixed signature of this command.
    fn signature(&self) -> &CommandSignature;

    /// Run the command against the arguments left after the prefix.
    ///
    /// Returns `Ok(true)` on success. On an expected failure the command
    /// writes its own diagnostic to `ctx.console` and returns `Ok(false)`.
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError>;

    fn prefix(&self) -> &Prefix {
        self.signature().prefix()
    }

    fn constraints(&self) -> &[Box<dyn ArgumentConstraint>] {
        self.signature().constraints()
    }

    fn description(&self) -> &str {
        self.signature().description()
    }

    fn usage(&self) -> String {
        self.signature().usage()
    }
}

impl fmt::Debug for dyn Command + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("prefix", &self.prefix().to_string())
            .finish_non_exhaustive()
    }
}

/// Per-dispatch collaborators handed to a command.
pub struct CommandContext<'a> {
    /// Sink for output and diagnostics.
    pub console: &'a mut dyn Console,
    history: Option<&'a CommandHistory>,
    catalog: &'a [CatalogEntry],
    exit_requested: bool,
}

impl<'a> CommandContext<'a> {
    /// Create a context writing to `console`.
    pub fn new(console: &'a mut dyn Console) -> Self {
        Self {
            console,
            history: None,
            catalog: &[],
            exit_requested: false,
        }
    }

    /// Expose the session's command history.
    pub fn with_history(mut self, history: &'a CommandHistory) -> Self {
        self.history = Some(history);
        self
    }

    /// Expose the list of every registered command.
    pub fn with_catalog(mut self, catalog: &'a [CatalogEntry]) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn history(&self) -> Option<&'a CommandHistory> {
        self.history
    }

    pub fn catalog(&self) -> &'a [CatalogEntry] {
        self.catalog
    }

    /// Ask the enclosing read loop to stop after this command.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
