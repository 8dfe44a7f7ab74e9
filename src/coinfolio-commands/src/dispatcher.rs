//! Resolution of raw input lines across all registries.

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::command::{CommandContext, CommandError};
use crate::prefix::Prefix;
use crate::registry::{CommandRegistry, RegistryError, Resolution};

/// Classification of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// No registry owns a prefix leading the input (or the input was blank).
    NotFound,
    /// A constraint rejected the arguments; the command did not run.
    InvalidArguments,
    /// The command ran and reported a failure.
    ExecutionFailed,
    /// The command ran to completion.
    Success,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidArguments => "invalid_arguments",
            Self::ExecutionFailed => "execution_failed",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecoverable error escaping a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The resolved command failed in a way it could not handle itself.
    #[error("Command '{prefix}' failed: {source}")]
    Command {
        prefix: Prefix,
        #[source]
        source: CommandError,
    },
}

/// One registered command as listed in help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub registry: String,
    pub prefix: Prefix,
    pub usage: String,
    pub description: String,
}

/// Split a raw line into whitespace-delimited tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Ordered collection of registries resolving input to a single command.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registries: Vec<CommandRegistry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registry.
    ///
    /// Fails if any of its prefixes is already owned by an earlier registry.
    pub fn add_registry(&mut self, registry: CommandRegistry) -> Result<(), RegistryError> {
        for prefix in registry.prefixes() {
            if let Some(owner) = self.registries.iter().find(|r| r.contains(prefix)) {
                return Err(RegistryError::ConflictingPrefix {
                    prefix: prefix.clone(),
                    existing: owner.label().to_string(),
                    incoming: registry.label().to_string(),
                });
            }
        }

        debug!(
            registry = registry.label(),
            commands = registry.len(),
            "Added registry"
        );
        self.registries.push(registry);
        Ok(())
    }

    /// Builder form of [`add_registry`](Self::add_registry).
    pub fn with_registry(mut self, registry: CommandRegistry) -> Result<Self, RegistryError> {
        self.add_registry(registry)?;
        Ok(self)
    }

    pub fn registries(&self) -> &[CommandRegistry] {
        &self.registries
    }

    /// Pick the longest prefix leading `tokens` across every registry.
    ///
    /// Registries are consulted in registration order and the first hit of
    /// maximal length is kept.
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S]) -> Option<Resolution<'_>> {
        let mut best: Option<Resolution<'_>> = None;

        for hit in self.registries.iter().filter_map(|r| r.try_resolve(tokens)) {
            if best.is_none_or(|b| hit.consumed > b.consumed) {
                best = Some(hit);
            }
        }

        best
    }

    /// Resolve, validate and execute one raw input line.
    pub fn dispatch(
        &self,
        line: &str,
        ctx: &mut CommandContext<'_>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            return Ok(DispatchOutcome::NotFound);
        }

        let Some(hit) = self.resolve(&tokens) else {
            debug!(input = %line.trim(), "No command matched");
            ctx.console
                .error(&format!("Unknown command: '{}'", tokens.join(" ")));
            return Ok(DispatchOutcome::NotFound);
        };

        let command = hit.command;
        let args = &tokens[hit.consumed..];
        debug!(
            registry = hit.registry,
            prefix = %command.prefix(),
            args = args.len(),
            "Resolved command"
        );

        if let Some(violated) = command.constraints().iter().find(|c| !c.is_valid(args)) {
            debug!(prefix = %command.prefix(), constraint = ?violated, "Arguments rejected");
            violated.on_invalid(args, &mut *ctx.console);
            return Ok(DispatchOutcome::InvalidArguments);
        }

        match command.execute(args, ctx) {
            Ok(true) => Ok(DispatchOutcome::Success),
            Ok(false) => {
                debug!(prefix = %command.prefix(), "Command reported failure");
                Ok(DispatchOutcome::ExecutionFailed)
            }
            Err(source) => {
                warn!(prefix = %command.prefix(), error = %source, "Command failed unrecoverably");
                Err(DispatchError::Command {
                    prefix: command.prefix().clone(),
                    source,
                })
            }
        }
    }

    /// List every registered command, grouped by registry in registration
    /// order and sorted by prefix within a registry.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.registries
            .iter()
            .flat_map(|registry| {
                registry.iter().map(move |command| CatalogEntry {
                    registry: registry.label().to_string(),
                    prefix: command.prefix().clone(),
                    usage: command.usage(),
                    description: command.description().to_string(),
                })
            })
            .collect()
    }

    /// Total number of registered commands.
    pub fn len(&self) -> usize {
        self.registries.iter().map(CommandRegistry::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::command::{Command, CommandSignature};
    use crate::console::BufferConsole;
    use crate::constraint::ArgumentCount;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    enum Behavior {
        Succeed,
        Fail,
        Break,
    }

    #[derive(Debug)]
    struct Probe {
        signature: CommandSignature,
        behavior: Behavior,
        runs: Rc<Cell<usize>>,
    }

    impl Command for Probe {
        fn signature(&self) -> &CommandSignature {
            &self.signature
        }

        fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
            self.runs.set(self.runs.get() + 1);
            match self.behavior {
                Behavior::Succeed => Ok(true),
                Behavior::Fail => {
                    ctx.console.error("collaborator unavailable");
                    Ok(false)
                }
                Behavior::Break => Err(CommandError::InvalidState("corrupt".to_string())),
            }
        }
    }

    fn probe(prefix: &str, count: ArgumentCount, behavior: Behavior) -> (Probe, Rc<Cell<usize>>) {
        let runs = Rc::new(Cell::new(0));
        let probe = Probe {
            signature: CommandSignature::new(Prefix::new(prefix)).constraint(count),
            behavior,
            runs: runs.clone(),
        };
        (probe, runs)
    }

    #[test]
    fn test_blank_line_is_silent_not_found() {
        let dispatcher = Dispatcher::new();
        let mut console = BufferConsole::new();
        let mut ctx = CommandContext::new(&mut console);

        let outcome = dispatcher.dispatch("   ", &mut ctx).unwrap();
        assert_eq!(outcome, DispatchOutcome::NotFound);
        assert!(console.is_empty());
    }

    #[test]
    fn test_cross_registry_conflict_rejected() {
        let (a, _) = probe("status", ArgumentCount::none(), Behavior::Succeed);
        let (b, _) = probe("STATUS", ArgumentCount::none(), Behavior::Succeed);

        let mut dispatcher = Dispatcher::new();
        dispatcher
            .add_registry(CommandRegistry::new("System").with(a).unwrap())
            .unwrap();
        let err = dispatcher
            .add_registry(CommandRegistry::new("Portfolio").with(b).unwrap())
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Prefix 'status' of Portfolio registry is already owned by System registry"
        );
        assert_eq!(dispatcher.registries().len(), 1);
    }

    #[test]
    fn test_longest_prefix_across_registries() {
        let (short, short_runs) = probe("market", ArgumentCount::at_least(0), Behavior::Succeed);
        let (long, long_runs) = probe("market price", ArgumentCount::exactly(1), Behavior::Succeed);

        let dispatcher = Dispatcher::new()
            .with_registry(CommandRegistry::new("System").with(short).unwrap())
            .and_then(|d| d.with_registry(CommandRegistry::new("Market").with(long).unwrap()))
            .unwrap();

        let hit = dispatcher.resolve(&["market", "price", "btc"]).unwrap();
        assert_eq!(hit.registry, "Market");
        assert_eq!(hit.consumed, 2);

        let mut console = BufferConsole::new();
        let mut ctx = CommandContext::new(&mut console);
        let outcome = dispatcher.dispatch("Market PRICE btc", &mut ctx).unwrap();

        assert_eq!(outcome, DispatchOutcome::Success);
        assert_eq!(long_runs.get(), 1);
        assert_eq!(short_runs.get(), 0);
    }

    #[test]
    fn test_execution_failure_classified() {
        let (cmd, runs) = probe("market price", ArgumentCount::exactly(1), Behavior::Fail);
        let dispatcher = Dispatcher::new()
            .with_registry(CommandRegistry::new("Market").with(cmd).unwrap())
            .unwrap();

        let mut console = BufferConsole::new();
        let mut ctx = CommandContext::new(&mut console);
        let outcome = dispatcher.dispatch("market price btc", &mut ctx).unwrap();

        assert_eq!(outcome, DispatchOutcome::ExecutionFailed);
        assert_eq!(runs.get(), 1);
        assert_eq!(console.errors(), vec!["collaborator unavailable"]);
    }

    #[test]
    fn test_unrecoverable_error_propagates() {
        let (cmd, _) = probe("status", ArgumentCount::none(), Behavior::Break);
        let dispatcher = Dispatcher::new()
            .with_registry(CommandRegistry::new("System").with(cmd).unwrap())
            .unwrap();

        let mut console = BufferConsole::new();
        let mut ctx = CommandContext::new(&mut console);
        let err = dispatcher.dispatch("status", &mut ctx).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Command 'status' failed: Invalid internal state: corrupt"
        );
    }

    #[test]
    fn test_first_failing_constraint_reported_only() {
        let runs = Rc::new(Cell::new(0));
        let cmd = Probe {
            signature: CommandSignature::new(Prefix::new("portfolio track"))
                .constraint(ArgumentCount::exactly(1))
                .constraint(ArgumentCount::exactly(2)),
            behavior: Behavior::Succeed,
            runs: runs.clone(),
        };
        let dispatcher = Dispatcher::new()
            .with_registry(CommandRegistry::new("Portfolio").with(cmd).unwrap())
            .unwrap();

        let mut console = BufferConsole::new();
        let mut ctx = CommandContext::new(&mut console);
        let outcome = dispatcher.dispatch("portfolio track", &mut ctx).unwrap();

        assert_eq!(outcome, DispatchOutcome::InvalidArguments);
        assert_eq!(console.errors(), vec!["Expected exactly 1 argument, got 0"]);
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_catalog_order() {
        let (a, _) = probe("status", ArgumentCount::none(), Behavior::Succeed);
        let (b, _) = probe("help", ArgumentCount::none(), Behavior::Succeed);
        let (c, _) = probe("portfolio list", ArgumentCount::none(), Behavior::Succeed);

        let dispatcher = Dispatcher::new()
            .with_registry(
                CommandRegistry::new("System")
                    .with(a)
                    .and_then(|r| r.with(b))
                    .unwrap(),
            )
            .and_then(|d| d.with_registry(CommandRegistry::new("Portfolio").with(c).unwrap()))
            .unwrap();

        let listed: Vec<_> = dispatcher
            .catalog()
            .into_iter()
            .map(|e| format!("{}:{}", e.registry, e.prefix))
            .collect();
        assert_eq!(
            listed,
            vec!["System:help", "System:status", "Portfolio:portfolio list"]
        );
        assert_eq!(dispatcher.len(), 3);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  a \t b\n"), vec!["a", "b"]);
        assert!(tokenize("").is_empty());
    }
}
