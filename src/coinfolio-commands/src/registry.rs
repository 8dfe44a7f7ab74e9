//! Command registry for one feature domain.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::command::Command;
use crate::prefix::Prefix;

/// Errors raised while populating registries.
///
/// These indicate a defect in how the program wires its commands and are
/// meant to abort startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two commands in the same registry share a prefix.
    #[error("Duplicate prefix '{prefix}' in {registry} registry")]
    DuplicatePrefix { registry: String, prefix: Prefix },

    /// A command tried to register without any address words.
    #[error("Empty prefix in {registry} registry")]
    EmptyPrefix { registry: String },

    /// A registry claims a prefix another registry already owns.
    #[error("Prefix '{prefix}' of {incoming} registry is already owned by {existing} registry")]
    ConflictingPrefix {
        prefix: Prefix,
        existing: String,
        incoming: String,
    },
}

/// A command chosen for the leading tokens of an input line.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// The resolved command.
    pub command: &'a dyn Command,
    /// How many leading tokens the prefix consumed.
    pub consumed: usize,
    /// Label of the registry that owns the command.
    pub registry: &'a str,
}

/// Registry of commands for one domain, keyed by unique prefix.
pub struct CommandRegistry {
    label: String,
    commands: BTreeMap<Prefix, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty registry labelled with its domain (e.g. `"System"`).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: BTreeMap::new(),
        }
    }

    /// Register a command.
    ///
    /// Fails if the exact prefix is already taken in this registry.
    pub fn register(&mut self, command: impl Command + 'static) -> Result<(), RegistryError> {
        self.register_boxed(Box::new(command))
    }

    /// Register an already boxed command.
    pub fn register_boxed(&mut self, command: Box<dyn Command>) -> Result<(), RegistryError> {
        let prefix = command.prefix().clone();
        if prefix.is_empty() {
            return Err(RegistryError::EmptyPrefix {
                registry: self.label.clone(),
            });
        }
        if self.commands.contains_key(&prefix) {
            return Err(RegistryError::DuplicatePrefix {
                registry: self.label.clone(),
                prefix,
            });
        }

        debug!(registry = %self.label, prefix = %prefix, "Registered command");
        self.commands.insert(prefix, command);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, command: impl Command + 'static) -> Result<Self, RegistryError> {
        self.register(command)?;
        Ok(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Find the longest registered prefix leading `tokens`.
    pub fn try_resolve<S: AsRef<str>>(&self, tokens: &[S]) -> Option<Resolution<'_>> {
        let mut best: Option<Resolution<'_>> = None;

        for (prefix, command) in &self.commands {
            if !prefix.matches(tokens) {
                continue;
            }
            if best.is_none_or(|b| prefix.len() > b.consumed) {
                best = Some(Resolution {
                    command: command.as_ref(),
                    consumed: prefix.len(),
                    registry: &self.label,
                });
            }
        }

        best
    }

    /// Get a command by its exact prefix.
    pub fn get(&self, prefix: &Prefix) -> Option<&dyn Command> {
        self.commands.get(prefix).map(|command| command.as_ref())
    }

    pub fn contains(&self, prefix: &Prefix) -> bool {
        self.commands.contains_key(prefix)
    }

    /// All prefixes, in sorted order.
    pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
        self.commands.keys()
    }

    /// Commands whose prefix starts with `partial` (for help and completion).
    pub fn find_by_prefix(&self, partial: &Prefix) -> Vec<&dyn Command> {
        self.commands
            .iter()
            .filter(|(prefix, _)| prefix.starts_with(partial))
            .map(|(_, command)| command.as_ref())
            .collect()
    }

    /// Iterate over all commands, sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|command| command.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("label", &self.label)
            .field(
                "prefixes",
                &self.commands.keys().map(ToString::to_string).collect::<Vec<_>>(),
            )
            .finish()
    }
}
