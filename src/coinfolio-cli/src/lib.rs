//! Coinfolio CLI library module.
//!
//! - `cli/` - argument parsing and startup
//! - `console` - terminal console
//! - `executors/` - one command registry per feature area
//! - `services` - collaborators the commands act on
//! - `session` - the read-dispatch loop

pub mod cli;
pub mod console;
pub mod executors;
pub mod services;
pub mod session;

pub use console::StdConsole;
pub use executors::build_dispatcher;
pub use services::{PriceError, PriceSource, QuoteTable, Services, SettingsStore, Watchlist};
pub use session::{PromptConsole, Session, SessionSummary};
