//! Read-dispatch loop.

use std::io::{self, BufRead, Write};

use coinfolio_commands::{
    BufferConsole, CatalogEntry, CommandContext, CommandHistory, Console, DispatchOutcome,
    Dispatcher,
};
use tracing::{debug, error, info};

use crate::console::StdConsole;

/// A console that can show an input prompt.
pub trait PromptConsole: Console {
    fn show_prompt(&mut self, prompt: &str) -> io::Result<()>;
}

impl<O: Write, E: Write> PromptConsole for StdConsole<O, E> {
    fn show_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.prompt(prompt)
    }
}

impl PromptConsole for BufferConsole {
    fn show_prompt(&mut self, _: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Counts collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Non-blank lines dispatched.
    pub dispatched: usize,
    /// Dispatched lines that did not succeed.
    pub failed: usize,
    /// Whether a command asked the session to end.
    pub exit_requested: bool,
}

impl SessionSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Owns the dispatcher, its catalog and the input history for one user.
pub struct Session<C: PromptConsole> {
    dispatcher: Dispatcher,
    catalog: Vec<CatalogEntry>,
    history: CommandHistory,
    console: C,
}

impl<C: PromptConsole> Session<C> {
    pub fn new(dispatcher: Dispatcher, history: CommandHistory, console: C) -> Self {
        let catalog = dispatcher.catalog();
        Self {
            dispatcher,
            catalog,
            history,
            console,
        }
    }

    /// Dispatch one line and record it in history.
    ///
    /// Returns the outcome and whether the command asked to end the session.
    /// Unrecoverable command errors are logged, reported once on the console
    /// and recorded as a failed execution.
    pub fn execute_line(&mut self, line: &str) -> (DispatchOutcome, bool) {
        let mut ctx = CommandContext::new(&mut self.console)
            .with_history(&self.history)
            .with_catalog(&self.catalog);

        let outcome = match self.dispatcher.dispatch(line, &mut ctx) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(input = %line.trim(), error = %err, "Unrecoverable command error");
                ctx.console.error(&format!("Internal error: {err}"));
                DispatchOutcome::ExecutionFailed
            }
        };
        let exit_requested = ctx.exit_requested();

        debug!(input = %line.trim(), %outcome, "Dispatched line");
        self.history.record(line, outcome);
        (outcome, exit_requested)
    }

    /// Dispatch lines from `input` until EOF or an exit request.
    ///
    /// `prompt` is shown before each read when set.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: Option<&str>) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut lines = input.lines();

        loop {
            if let Some(prompt) = prompt {
                self.console.show_prompt(prompt)?;
            }
            let Some(line) = lines.next().transpose()? else {
                debug!("End of input");
                break;
            };
            if self.step(&line, &mut summary) {
                break;
            }
        }

        info!(
            dispatched = summary.dispatched,
            failed = summary.failed,
            "Session finished"
        );
        Ok(summary)
    }

    /// Dispatch each of `lines` in order, stopping early on an exit request.
    pub fn run_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for line in lines {
            if self.step(line.as_ref(), &mut summary) {
                break;
            }
        }
        summary
    }

    /// Returns `true` when the session should end.
    fn step(&mut self, line: &str, summary: &mut SessionSummary) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        let (outcome, exit_requested) = self.execute_line(line);
        summary.dispatched += 1;
        if !outcome.is_success() {
            summary.failed += 1;
        }
        summary.exit_requested = exit_requested;
        exit_requested
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}
