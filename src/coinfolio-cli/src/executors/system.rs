//! System commands: help, history, status, version, exit.

use std::rc::Rc;

use coinfolio_commands::{
    ArgumentCount, CatalogEntry, Command, CommandContext, CommandError, CommandRegistry,
    CommandSignature, NumericArgument, Prefix, RegistryError,
};

use crate::services::{PriceSource, Services, SettingsStore, Shared, Watchlist};

/// Number of history entries shown when no count is given.
const DEFAULT_HISTORY_COUNT: usize = 10;

pub fn registry(services: &Services) -> Result<CommandRegistry, RegistryError> {
    let status = Prefix::new("status");

    CommandRegistry::new("System")
        .with(HelpCommand::new())?
        .with(HistoryCommand::new())?
        .with(StatusCommand::new(status.clone(), services))?
        .with(ConnectionCommand::new(status.join("connection"), services))?
        .with(VersionCommand::new())?
        .with(ExitCommand::new("exit"))?
        .with(ExitCommand::new("quit"))
}

/// Lists registered commands, optionally only those under given words.
pub struct HelpCommand {
    signature: CommandSignature,
}

impl HelpCommand {
    pub fn new() -> Self {
        Self {
            signature: CommandSignature::new(Prefix::new("help"))
                .arguments("[command words...]")
                .describe("List available commands"),
        }
    }
}

impl Command for HelpCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let filter = Prefix::new(&args.join(" "));
        let entries: Vec<&CatalogEntry> = ctx
            .catalog()
            .iter()
            .filter(|e| e.prefix.starts_with(&filter))
            .collect();

        if entries.is_empty() {
            ctx.console.error(&format!("No commands match '{filter}'"));
            return Ok(false);
        }

        let width = entries.iter().map(|e| e.usage.len()).max().unwrap_or(0);
        let mut current_registry: Option<&str> = None;
        for entry in entries {
            if current_registry != Some(entry.registry.as_str()) {
                ctx.console.output(&format!("{} commands:", entry.registry));
                current_registry = Some(entry.registry.as_str());
            }
            ctx.console
                .output(&format!("  {:<width$}  {}", entry.usage, entry.description));
        }
        Ok(true)
    }
}

/// Shows recently entered lines, newest first.
pub struct HistoryCommand {
    signature: CommandSignature,
}

impl HistoryCommand {
    pub fn new() -> Self {
        Self {
            signature: CommandSignature::new(Prefix::new("history"))
                .arguments("[count]")
                .describe("Show recently entered commands")
                .constraint(ArgumentCount::between(0, 1))
                .constraint(NumericArgument::whole_at(0)),
        }
    }
}

impl Command for HistoryCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let count = match args.first() {
            None => DEFAULT_HISTORY_COUNT,
            Some(arg) => arg.parse::<usize>().map_err(|e| {
                CommandError::InvalidState(format!("unchecked history count '{arg}': {e}"))
            })?,
        };

        let Some(history) = ctx.history() else {
            ctx.console.error("History is not available in this session");
            return Ok(false);
        };

        if history.is_empty() {
            ctx.console.notice("History is empty");
            return Ok(true);
        }

        for (offset, entry) in history.recent(count).enumerate() {
            ctx.console.output(&format!(
                "{offset:>4}  {}  {:<40} [{}]",
                entry.at.format("%H:%M:%S"),
                entry.line,
                entry.outcome
            ));
        }
        Ok(true)
    }
}

/// Overall status: settings, watchlist size, connectivity.
pub struct StatusCommand {
    signature: CommandSignature,
    settings: Shared<SettingsStore>,
    watchlist: Shared<Watchlist>,
    prices: Rc<dyn PriceSource>,
}

impl StatusCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .describe("Show session status")
                .constraint(ArgumentCount::none()),
            settings: services.settings.clone(),
            watchlist: services.watchlist.clone(),
            prices: services.prices.clone(),
        }
    }
}

impl Command for StatusCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let profile = self.settings.borrow().reporting_profile();
        let tracked = self.watchlist.borrow().len();
        let connection = if self.prices.is_reachable() {
            "online"
        } else {
            "offline"
        };

        ctx.console.output(&format!("Reporting profile: {profile}"));
        ctx.console.output(&format!("Tracked coins:     {tracked}"));
        ctx.console.output(&format!("Market data:       {connection}"));
        Ok(true)
    }
}

/// Checks that the market data source can be reached.
pub struct ConnectionCommand {
    signature: CommandSignature,
    prices: Rc<dyn PriceSource>,
}

impl ConnectionCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .describe("Check the market data connection")
                .constraint(ArgumentCount::none()),
            prices: services.prices.clone(),
        }
    }
}

impl Command for ConnectionCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        if self.prices.is_reachable() {
            ctx.console.notice("Connected to market data source");
            Ok(true)
        } else {
            ctx.console.error("No internet connection");
            Ok(false)
        }
    }
}

pub struct VersionCommand {
    signature: CommandSignature,
}

impl VersionCommand {
    pub fn new() -> Self {
        Self {
            signature: CommandSignature::new(Prefix::new("version"))
                .describe("Show the program version")
                .constraint(ArgumentCount::none()),
        }
    }
}

impl Command for VersionCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        ctx.console
            .output(concat!("coinfolio ", env!("CARGO_PKG_VERSION")));
        Ok(true)
    }
}

/// Ends the session. Registered as both `exit` and `quit`.
pub struct ExitCommand {
    signature: CommandSignature,
}

impl ExitCommand {
    pub fn new(word: &str) -> Self {
        Self {
            signature: CommandSignature::new(Prefix::new(word))
                .describe("Leave the shell")
                .constraint(ArgumentCount::none()),
        }
    }
}

impl Command for ExitCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        ctx.request_exit();
        Ok(true)
    }
}
