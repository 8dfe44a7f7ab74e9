//! Argument constraints checked before a command runs.

use std::fmt;

use crate::console::Console;

/// Validation predicate over the arguments left after the prefix.
///
/// A failed check is a plain `false`; the dispatcher then calls
/// [`on_invalid`](Self::on_invalid) to report it.
pub trait ArgumentConstraint: fmt::Debug {
    /// Whether `args` satisfy this constraint.
    fn is_valid(&self, args: &[&str]) -> bool;

    /// Human-readable description of why `args` were rejected.
    fn violation(&self, args: &[&str]) -> String;

    /// Report a violation to the console.
    fn on_invalid(&self, args: &[&str], console: &mut dyn Console) {
        console.error(&self.violation(args));
    }
}

/// Inclusive bounds on the number of arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentCount {
    min: usize,
    max: usize,
}

impl ArgumentCount {
    /// Accept between `min` and `max` arguments, both inclusive.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn between(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Accept exactly `n` arguments.
    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Accept no arguments.
    pub fn none() -> Self {
        Self::exactly(0)
    }

    /// Accept `n` or more arguments.
    pub fn at_least(n: usize) -> Self {
        Self {
            min: n,
            max: usize::MAX,
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    fn expectation(&self) -> String {
        match (self.min, self.max) {
            (0, 0) => "no arguments".to_string(),
            (min, usize::MAX) => format!("at least {min} {}", plural(min)),
            (min, max) if min == max => format!("exactly {min} {}", plural(min)),
            (min, max) => format!("between {min} and {max} arguments"),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "argument" } else { "arguments" }
}

impl ArgumentConstraint for ArgumentCount {
    fn is_valid(&self, args: &[&str]) -> bool {
        (self.min..=self.max).contains(&args.len())
    }

    fn violation(&self, args: &[&str]) -> String {
        format!("Expected {}, got {}", self.expectation(), args.len())
    }
}

/// The argument at `position`, when present, must be a finite number.
///
/// [`whole_at`](Self::whole_at) narrows this to non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericArgument {
    position: usize,
    whole: bool,
}

impl NumericArgument {
    pub fn at(position: usize) -> Self {
        Self {
            position,
            whole: false,
        }
    }

    /// Accept only non-negative whole numbers, e.g. a count.
    pub fn whole_at(position: usize) -> Self {
        Self {
            position,
            whole: true,
        }
    }
}

impl ArgumentConstraint for NumericArgument {
    fn is_valid(&self, args: &[&str]) -> bool {
        match args.get(self.position) {
            Some(arg) if self.whole => arg.parse::<usize>().is_ok(),
            Some(arg) => arg.parse::<f64>().is_ok_and(f64::is_finite),
            None => true,
        }
    }

    fn violation(&self, args: &[&str]) -> String {
        let value = args.get(self.position).copied().unwrap_or_default();
        let kind = if self.whole { "a whole number" } else { "a number" };
        format!(
            "Argument {} must be {kind}, got '{value}'",
            self.position + 1
        )
    }
}

/// The argument at `position`, when present, must be one of a fixed set of
/// words (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    position: usize,
    choices: Vec<String>,
}

impl OneOf {
    pub fn new<I, S>(position: usize, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            position,
            choices: choices
                .into_iter()
                .map(|c| c.into().to_lowercase())
                .collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl ArgumentConstraint for OneOf {
    fn is_valid(&self, args: &[&str]) -> bool {
        match args.get(self.position) {
            Some(arg) => {
                let arg = arg.to_lowercase();
                self.choices.contains(&arg)
            }
            None => true,
        }
    }

    fn violation(&self, args: &[&str]) -> String {
        let value = args.get(self.position).copied().unwrap_or_default();
        format!(
            "Argument {} must be one of [{}], got '{value}'",
            self.position + 1,
            self.choices.join(", ")
        )
    }
}
