//! Bounded history of dispatched lines.

use std::num::NonZeroUsize;

use chrono::{DateTime, Local};
use coinfolio_utils_stack::{SearchableStack, StackError};

use crate::dispatcher::DispatchOutcome;

/// One dispatched input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub line: String,
    pub outcome: DispatchOutcome,
    pub at: DateTime<Local>,
}

/// Recent input lines, most recent first, with a fixed memory ceiling.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: SearchableStack<HistoryEntry>,
}

impl CommandHistory {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: SearchableStack::new(capacity),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, StackError> {
        Ok(Self {
            entries: SearchableStack::with_capacity(capacity)?,
        })
    }

    /// Record a line. Blank lines are ignored.
    pub fn record(&mut self, line: &str, outcome: DispatchOutcome) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.entries.push(HistoryEntry {
            line: line.to_string(),
            outcome,
            at: Local::now(),
        });
    }

    /// Entry `offset` positions back (0 = most recent).
    pub fn get(&self, offset: usize) -> Result<&HistoryEntry, StackError> {
        self.entries.element_at(offset)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.top().ok()
    }

    /// Up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}
