//! Command registries for each feature area.
//!
//! - `system` - help, history, status, version, exit
//! - `settings` - reading and changing user settings
//! - `portfolio` - the coin watchlist
//! - `market` - coin quotes
//!
//! Registries are added to the dispatcher in that order.

pub mod market;
pub mod portfolio;
pub mod settings;
pub mod system;

use coinfolio_commands::{Dispatcher, RegistryError};

use crate::services::Services;

/// Build the dispatcher with every feature area registered.
pub fn build_dispatcher(services: &Services) -> Result<Dispatcher, RegistryError> {
    Dispatcher::new()
        .with_registry(system::registry(services)?)?
        .with_registry(settings::registry(services)?)?
        .with_registry(portfolio::registry(services)?)?
        .with_registry(market::registry(services)?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use coinfolio_commands::{BufferConsole, CommandContext, DispatchOutcome, Dispatcher};

    use crate::services::{QuoteTable, Services, SettingsStore, Watchlist};

    pub fn services(online: bool) -> Services {
        Services::new(
            SettingsStore::default(),
            Watchlist::new(["btc"]),
            Rc::new(QuoteTable::new(
                online,
                BTreeMap::from([
                    ("btc".to_string(), 64000.0),
                    ("eth".to_string(), 3100.5),
                ]),
            )),
        )
    }

    /// Dispatch one line on a fresh console and return both.
    pub fn run(dispatcher: &Dispatcher, line: &str) -> (DispatchOutcome, BufferConsole) {
        let catalog = dispatcher.catalog();
        let mut console = BufferConsole::new();
        let mut ctx = CommandContext::new(&mut console).with_catalog(&catalog);
        let outcome = dispatcher.dispatch(line, &mut ctx).unwrap();
        (outcome, console)
    }
}
