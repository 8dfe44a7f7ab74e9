//! Command dispatch engine for Coinfolio.
//!
//! This crate turns a raw line of user input into a validated invocation of a
//! single registered command.
//!
//! # Addressing
//!
//! Every command is addressed by a multi-word [`Prefix`] such as
//! `settings get reporting profile`. Prefixes are matched word-for-word and
//! case-insensitively against the leading tokens of the input. When several
//! registered prefixes lead the same input, the longest one wins, so
//! `status connection` and `status` can coexist.
//!
//! # Registries
//!
//! Each feature area owns a [`CommandRegistry`] labelled with its domain
//! (`"System"`, `"Portfolio"`, ...). The [`Dispatcher`] holds registries in
//! registration order and refuses a registry that would claim a prefix another
//! registry already owns.
//!
//! # Dispatch
//!
//! ```rust,ignore
//! use coinfolio_commands::{BufferConsole, CommandContext, DispatchOutcome, Dispatcher};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.add_registry(system_registry())?;
//!
//! let mut console = BufferConsole::new();
//! let mut ctx = CommandContext::new(&mut console);
//! match dispatcher.dispatch("status connection", &mut ctx)? {
//!     DispatchOutcome::Success => {}
//!     other => eprintln!("{other}"),
//! }
//! ```
//!
//! Argument validation and command failures are reported through the
//! [`Console`] in the context and classified as a [`DispatchOutcome`]. Only
//! unrecoverable [`CommandError`]s surface as `Err`.

mod command;
mod console;
mod constraint;
mod dispatcher;
mod history;
mod prefix;
mod registry;

pub use command::{Command, CommandContext, CommandError, CommandSignature};
pub use console::{BufferConsole, Console, ConsoleMessage, Severity};
pub use constraint::{ArgumentConstraint, ArgumentCount, NumericArgument, OneOf};
pub use dispatcher::{CatalogEntry, DispatchError, DispatchOutcome, Dispatcher, tokenize};
pub use history::{CommandHistory, HistoryEntry};
pub use prefix::Prefix;
pub use registry::{CommandRegistry, RegistryError, Resolution};

pub use coinfolio_utils_stack::StackError;
