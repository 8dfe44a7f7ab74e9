//! Leaf collaborators invoked from command handlers.
//!
//! Each feature area's state lives here and is shared with the commands that
//! read or change it. The read loop is single-threaded, so sharing is plain
//! `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use coinfolio_common::{CoinfolioConfig, ReportingProfile};
use thiserror::Error;

/// Shared, single-threaded handle.
pub type Shared<T> = Rc<RefCell<T>>;

/// User settings changed through the `settings` commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    reporting_profile: ReportingProfile,
}

impl SettingsStore {
    pub fn new(reporting_profile: ReportingProfile) -> Self {
        Self { reporting_profile }
    }

    pub fn reporting_profile(&self) -> ReportingProfile {
        self.reporting_profile
    }

    pub fn set_reporting_profile(&mut self, profile: ReportingProfile) {
        self.reporting_profile = profile;
    }

    /// Every setting as `(name, value)`, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![("reporting profile", self.reporting_profile.to_string())]
    }
}

/// Coins the user follows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    coins: BTreeSet<String>,
}

impl Watchlist {
    pub fn new<I, S>(coins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            coins: coins.into_iter().map(|c| normalize_coin(c.as_ref())).collect(),
        }
    }

    /// Start tracking `coin`. Returns `false` if it was already tracked.
    pub fn track(&mut self, coin: &str) -> bool {
        self.coins.insert(normalize_coin(coin))
    }

    /// Stop tracking `coin`. Returns `false` if it was not tracked.
    pub fn untrack(&mut self, coin: &str) -> bool {
        self.coins.remove(&normalize_coin(coin))
    }

    pub fn contains(&self, coin: &str) -> bool {
        self.coins.contains(&normalize_coin(coin))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.coins.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

/// Coin symbols are stored lowercase.
pub fn normalize_coin(coin: &str) -> String {
    coin.trim().to_lowercase()
}

/// Failure talking to a price source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("No internet connection")]
    Offline,
}

/// Source of USD coin quotes.
pub trait PriceSource {
    /// Whether the source can currently be reached.
    fn is_reachable(&self) -> bool;

    /// Quote for `coin`, or `None` if the source does not know it.
    fn quote(&self, coin: &str) -> Result<Option<f64>, PriceError>;

    /// Every coin the source can quote.
    fn coins(&self) -> Result<Vec<String>, PriceError>;
}

/// Price source serving a fixed table of quotes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteTable {
    online: bool,
    quotes: BTreeMap<String, f64>,
}

impl QuoteTable {
    pub fn new(online: bool, quotes: BTreeMap<String, f64>) -> Self {
        Self {
            online,
            quotes: quotes
                .into_iter()
                .map(|(coin, quote)| (normalize_coin(&coin), quote))
                .collect(),
        }
    }
}

impl PriceSource for QuoteTable {
    fn is_reachable(&self) -> bool {
        self.online
    }

    fn quote(&self, coin: &str) -> Result<Option<f64>, PriceError> {
        if !self.online {
            return Err(PriceError::Offline);
        }
        Ok(self.quotes.get(&normalize_coin(coin)).copied())
    }

    fn coins(&self) -> Result<Vec<String>, PriceError> {
        if !self.online {
            return Err(PriceError::Offline);
        }
        Ok(self.quotes.keys().cloned().collect())
    }
}

/// All collaborators the executors are built with.
#[derive(Clone)]
pub struct Services {
    pub settings: Shared<SettingsStore>,
    pub watchlist: Shared<Watchlist>,
    pub prices: Rc<dyn PriceSource>,
}

impl Services {
    pub fn new(settings: SettingsStore, watchlist: Watchlist, prices: Rc<dyn PriceSource>) -> Self {
        Self {
            settings: Rc::new(RefCell::new(settings)),
            watchlist: Rc::new(RefCell::new(watchlist)),
            prices,
        }
    }

    /// Build collaborators from configuration.
    pub fn from_config(config: &CoinfolioConfig) -> Self {
        Self::new(
            SettingsStore::new(config.settings.reporting_profile),
            Watchlist::new(&config.portfolio.watchlist),
            Rc::new(QuoteTable::new(
                config.market.online,
                config.market.quotes.clone(),
            )),
        )
    }
}
