//! Market data commands.

use std::rc::Rc;

use coinfolio_commands::{
    ArgumentCount, Command, CommandContext, CommandError, CommandRegistry, CommandSignature,
    Prefix, RegistryError,
};
use tracing::{debug, warn};

use crate::services::{PriceSource, Services, normalize_coin};

/// Most coins quoted in one `market price` call.
pub const MAX_PRICE_ARGS: usize = 10;

pub fn registry(services: &Services) -> Result<CommandRegistry, RegistryError> {
    let market = Prefix::new("market");

    CommandRegistry::new("Market")
        .with(PriceCommand::new(market.join("price"), services))?
        .with(CoinsCommand::new(market.join("coins"), services))
}

/// Quotes each requested coin in USD.
///
/// Coins without a quote are warned about once the others are listed. The
/// command fails when nothing could be quoted or the source is unreachable.
pub struct PriceCommand {
    signature: CommandSignature,
    prices: Rc<dyn PriceSource>,
}

impl PriceCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .arguments("<coin> [coin...]")
                .describe("Show USD prices")
                .constraint(ArgumentCount::between(1, MAX_PRICE_ARGS)),
            prices: services.prices.clone(),
        }
    }
}

impl Command for PriceCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let mut quoted = Vec::new();
        let mut unknown = Vec::new();
        for coin in args {
            let coin = normalize_coin(coin);
            match self.prices.quote(&coin) {
                Ok(Some(price)) => quoted.push((coin, price)),
                Ok(None) => unknown.push(coin),
                Err(e) => {
                    warn!(%coin, error = %e, "Price lookup failed");
                    ctx.console.error(&e.to_string());
                    return Ok(false);
                }
            }
        }

        debug!(
            requested = args.len(),
            quoted = quoted.len(),
            "Price lookup finished"
        );
        if quoted.is_empty() {
            ctx.console
                .error(&format!("No prices available for {}", unknown.join(", ")));
            return Ok(false);
        }

        for (coin, price) in &quoted {
            ctx.console.output(&format!("{coin:<8} ${price:>12.2}"));
        }
        for coin in &unknown {
            ctx.console.warning(&format!("No quote for {coin}"));
        }
        Ok(true)
    }
}

pub struct CoinsCommand {
    signature: CommandSignature,
    prices: Rc<dyn PriceSource>,
}

impl CoinsCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .describe("List coins with known prices")
                .constraint(ArgumentCount::none()),
            prices: services.prices.clone(),
        }
    }
}

impl Command for CoinsCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        match self.prices.coins() {
            Ok(coins) if coins.is_empty() => {
                ctx.console.notice("No coins available");
                Ok(true)
            }
            Ok(coins) => {
                ctx.console.output(&coins.join(", "));
                Ok(true)
            }
            Err(e) => {
                ctx.console.error(&e.to_string());
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use coinfolio_commands::{DispatchOutcome, Severity};
    use pretty_assertions::assert_eq;

    use crate::executors::build_dispatcher;
    use crate::executors::test_support::{run, services};

    #[test]
    fn test_price_lists_known_coins() {
        let dispatcher = build_dispatcher(&services(true)).unwrap();
        let (outcome, console) = run(&dispatcher, "market price BTC doge eth");

        assert_eq!(outcome, DispatchOutcome::Success);
        assert_eq!(
            console.texts(Severity::Output),
            vec!["btc      $    64000.00", "eth      $     3100.50"]
        );
        assert_eq!(console.texts(Severity::Warning), vec!["No quote for doge"]);
    }

    #[test]
    fn test_price_fails_when_nothing_quoted() {
        let dispatcher = build_dispatcher(&services(true)).unwrap();
        let (outcome, console) = run(&dispatcher, "market price doge PEPE");
        assert_eq!(outcome, DispatchOutcome::ExecutionFailed);
        assert_eq!(console.messages().len(), 1);
        assert_eq!(
            console.errors(),
            vec!["No prices available for doge, pepe"]
        );
    }

    #[test]
    fn test_price_offline_is_recoverable_failure() {
        let dispatcher = build_dispatcher(&services(false)).unwrap();
        let (outcome, console) = run(&dispatcher, "market price btc");
        assert_eq!(outcome, DispatchOutcome::ExecutionFailed);
        assert_eq!(console.errors(), vec!["No internet connection"]);
    }

    #[test]
    fn test_price_argument_bounds() {
        let dispatcher = build_dispatcher(&services(true)).unwrap();

        let (outcome, console) = run(&dispatcher, "market price");
        assert_eq!(outcome, DispatchOutcome::InvalidArguments);
        assert_eq!(
            console.errors(),
            vec!["Expected between 1 and 10 arguments, got 0"]
        );

        let line = format!("market price {}", ["btc"; 11].join(" "));
        let (outcome, _) = run(&dispatcher, &line);
        assert_eq!(outcome, DispatchOutcome::InvalidArguments);
    }

    #[test]
    fn test_coins() {
        let (outcome, console) = run(&build_dispatcher(&services(true)).unwrap(), "market coins");
        assert_eq!(outcome, DispatchOutcome::Success);
        assert_eq!(console.texts(Severity::Output), vec!["btc, eth"]);

        let (outcome, console) = run(&build_dispatcher(&services(false)).unwrap(), "market coins");
        assert_eq!(outcome, DispatchOutcome::ExecutionFailed);
        assert_eq!(console.errors(), vec!["No internet connection"]);
    }
}
