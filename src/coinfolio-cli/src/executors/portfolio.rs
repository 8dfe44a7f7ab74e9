//! Portfolio watchlist commands.

use coinfolio_commands::{
    ArgumentCount, Command, CommandContext, CommandError, CommandRegistry, CommandSignature,
    Prefix, RegistryError,
};
use tracing::debug;

use crate::services::{Services, Shared, Watchlist, normalize_coin};

pub fn registry(services: &Services) -> Result<CommandRegistry, RegistryError> {
    let portfolio = Prefix::new("portfolio");

    CommandRegistry::new("Portfolio")
        .with(ListCommand::new(portfolio.join("list"), services))?
        .with(TrackCommand::new(portfolio.join("track"), services))?
        .with(UntrackCommand::new(portfolio.join("untrack"), services))
}

pub struct ListCommand {
    signature: CommandSignature,
    watchlist: Shared<Watchlist>,
}

impl ListCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .describe("List tracked coins")
                .constraint(ArgumentCount::none()),
            watchlist: services.watchlist.clone(),
        }
    }
}

impl Command for ListCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let watchlist = self.watchlist.borrow();
        if watchlist.is_empty() {
            ctx.console.notice("No coins tracked");
            return Ok(true);
        }
        for coin in watchlist.iter() {
            ctx.console.output(coin);
        }
        Ok(true)
    }
}

/// Adds one or more coins. Coins already tracked are reported, not failed.
pub struct TrackCommand {
    signature: CommandSignature,
    watchlist: Shared<Watchlist>,
}

impl TrackCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .arguments("<coin> [coin...]")
                .describe("Start tracking coins")
                .constraint(ArgumentCount::at_least(1)),
            watchlist: services.watchlist.clone(),
        }
    }
}

impl Command for TrackCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let mut watchlist = self.watchlist.borrow_mut();
        for coin in args {
            let coin = normalize_coin(coin);
            if watchlist.track(&coin) {
                debug!(%coin, "Tracking coin");
                ctx.console.notice(&format!("Tracking {coin}"));
            } else {
                ctx.console.warning(&format!("{coin} is already tracked"));
            }
        }
        Ok(true)
    }
}

pub struct UntrackCommand {
    signature: CommandSignature,
    watchlist: Shared<Watchlist>,
}

impl UntrackCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .arguments("<coin>")
                .describe("Stop tracking a coin")
                .constraint(ArgumentCount::exactly(1)),
            watchlist: services.watchlist.clone(),
        }
    }
}

impl Command for UntrackCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let coin = normalize_coin(args.first().copied().unwrap_or_default());
        if self.watchlist.borrow_mut().untrack(&coin) {
            debug!(%coin, "Untracked coin");
            ctx.console.notice(&format!("Stopped tracking {coin}"));
            Ok(true)
        } else {
            ctx.console.error(&format!("{coin} is not tracked"));
            Ok(false)
        }
    }
}
