//! End-to-end dispatch scenarios across registries.

use std::cell::RefCell;
use std::rc::Rc;

use coinfolio_commands::{
    ArgumentCount, BufferConsole, Command, CommandContext, CommandError, CommandHistory,
    CommandRegistry, CommandSignature, DispatchOutcome, Dispatcher, Prefix, RegistryError,
    Severity,
};
use coinfolio_utils_stack::{SearchableStack, StackError};
use pretty_assertions::assert_eq;

type Calls = Rc<RefCell<Vec<(String, Vec<String>)>>>;

/// Command that records every invocation with its arguments.
struct Recorder {
    signature: CommandSignature,
    calls: Calls,
}

impl Command for Recorder {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        self.calls.borrow_mut().push((
            self.signature.prefix().to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        ctx.console.notice("done");
        Ok(true)
    }
}

fn recorder(prefix: Prefix, count: ArgumentCount, calls: &Calls) -> Recorder {
    Recorder {
        signature: CommandSignature::new(prefix).constraint(count),
        calls: calls.clone(),
    }
}

fn system_dispatcher(calls: &Calls) -> Dispatcher {
    let status = Prefix::new("status");
    let mut system = CommandRegistry::new("System");
    system
        .register(recorder(status.join("connection"), ArgumentCount::none(), calls))
        .unwrap();
    system
        .register(recorder(status, ArgumentCount::between(0, 1), calls))
        .unwrap();

    let settings_get = Prefix::new("settings get");
    let mut settings = CommandRegistry::new("Settings");
    settings
        .register(recorder(settings_get.clone(), ArgumentCount::none(), calls))
        .unwrap();
    settings
        .register(recorder(
            settings_get.join("reporting profile"),
            ArgumentCount::none(),
            calls,
        ))
        .unwrap();

    let mut dispatcher = Dispatcher::new();
    dispatcher.add_registry(system).unwrap();
    dispatcher.add_registry(settings).unwrap();
    dispatcher
}

#[test]
fn longer_prefix_consumes_both_tokens() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut console = BufferConsole::new();
    let mut ctx = CommandContext::new(&mut console);

    let outcome = dispatcher.dispatch("status connection", &mut ctx).unwrap();

    assert_eq!(outcome, DispatchOutcome::Success);
    assert_eq!(
        *calls.borrow(),
        vec![("status connection".to_string(), Vec::<String>::new())]
    );
    assert_eq!(console.texts(Severity::Notice), vec!["done"]);
}

#[test]
fn extra_argument_fails_validation_without_running() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut console = BufferConsole::new();
    let mut ctx = CommandContext::new(&mut console);

    let outcome = dispatcher
        .dispatch("status connection extra", &mut ctx)
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::InvalidArguments);
    assert!(calls.borrow().is_empty());
    assert_eq!(console.errors(), vec!["Expected no arguments, got 1"]);
}

#[test]
fn shorter_prefix_takes_remaining_tokens_as_arguments() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut console = BufferConsole::new();
    let mut ctx = CommandContext::new(&mut console);

    let outcome = dispatcher.dispatch("STATUS verbose", &mut ctx).unwrap();

    assert_eq!(outcome, DispatchOutcome::Success);
    assert_eq!(
        *calls.borrow(),
        vec![("status".to_string(), vec!["verbose".to_string()])]
    );
}

#[test]
fn unknown_command_reports_once() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut console = BufferConsole::new();
    let mut ctx = CommandContext::new(&mut console);

    let outcome = dispatcher.dispatch("banana", &mut ctx).unwrap();

    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert!(calls.borrow().is_empty());
    assert_eq!(console.messages().len(), 1);
    assert_eq!(console.errors(), vec!["Unknown command: 'banana'"]);
}

#[test]
fn word_exact_matching_does_not_resolve_partial_words() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut console = BufferConsole::new();
    let mut ctx = CommandContext::new(&mut console);

    let outcome = dispatcher.dispatch("statusconnection", &mut ctx).unwrap();
    assert_eq!(outcome, DispatchOutcome::NotFound);
}

#[test]
fn nested_settings_prefix_wins_over_parent() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut console = BufferConsole::new();
    let mut ctx = CommandContext::new(&mut console);

    let outcome = dispatcher
        .dispatch("settings get reporting profile", &mut ctx)
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Success);

    let outcome = dispatcher
        .dispatch("settings get reporting", &mut ctx)
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::InvalidArguments);

    let prefixes: Vec<_> = calls.borrow().iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(prefixes, vec!["settings get reporting profile"]);
}

#[test]
fn duplicate_prefix_in_one_registry_is_rejected() {
    let calls = Calls::default();
    let mut registry = CommandRegistry::new("System");
    registry
        .register(recorder(Prefix::new("status"), ArgumentCount::none(), &calls))
        .unwrap();

    let err = registry
        .register(recorder(Prefix::new("status"), ArgumentCount::none(), &calls))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicatePrefix { .. }));
}

#[test]
fn history_records_outcomes_through_a_session() {
    let calls = Calls::default();
    let dispatcher = system_dispatcher(&calls);
    let mut history = CommandHistory::with_capacity(2).unwrap();
    let mut console = BufferConsole::new();

    for line in ["status", "banana", "status connection"] {
        let mut ctx = CommandContext::new(&mut console).with_history(&history);
        let outcome = dispatcher.dispatch(line, &mut ctx).unwrap();
        history.record(line, outcome);
    }

    assert_eq!(history.len(), 2);
    assert_eq!(history.get(0).unwrap().line, "status connection");
    assert_eq!(history.get(1).unwrap().outcome, DispatchOutcome::NotFound);
}

#[test]
fn stack_of_three_after_four_pushes() {
    let mut stack = SearchableStack::with_capacity(3).unwrap();
    for value in [1, 2, 3, 4] {
        stack.push(value);
    }

    assert_eq!(stack.len(), 3);
    assert_eq!(stack.element_at(0), Ok(&4));
    assert_eq!(stack.element_at(2), Ok(&2));
    assert_eq!(
        stack.element_at(3),
        Err(StackError::OutOfRange { offset: 3, len: 3 })
    );
}
