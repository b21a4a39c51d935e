#![allow(clippy::unwrap_used, reason = "tests unwrap successful parses")]

use std::cell::RefCell;

use logo_diagnostic::ErrorKind;
use logo_lexer::tokenize;
use logo_parse::{parse, WordTable};
use pretty_assertions::assert_eq;

use super::*;
use crate::{buffer_handler, Primitive};

fn machine() -> Machine {
    Machine::new(buffer_handler())
}

fn load(m: &Machine, src: &str) -> Vec<Expr> {
    parse(&tokenize(src), WordTable::new(m.words().signatures())).unwrap()
}

fn run_on(m: &mut Machine, src: &str) -> SessionState {
    let program = load(m, src);
    m.start(&program);
    m.run_to_completion(None)
}

fn run(src: &str) -> Machine {
    let mut m = machine();
    run_on(&mut m, src);
    m
}

fn output(m: &Machine) -> String {
    m.printer().output()
}

fn error_text(m: &Machine) -> String {
    m.error().map(ToString::to_string).unwrap_or_default()
}

#[test]
fn arithmetic_follows_priority() {
    let m = run("print 2 + 3 * 4\nprint 2 * 3 + 4\nprint 1 - 2 - 3\nprint (2 + 3) * 4\nprint 7 / 2");
    assert_eq!(m.state(), SessionState::Completed);
    assert_eq!(output(&m), "14\n10\n-4\n20\n3\n");
}

#[test]
fn comparisons_yield_words() {
    let m = run("print 1 < 2\nprint 3 > 4\nprint 3 = 3\nprint \"a = \"a\nprint [1 2] = [1 2]");
    assert_eq!(output(&m), "true\nfalse\ntrue\ntrue\ntrue\n");
}

#[test]
fn session_value_is_the_last_expression() {
    let m = run("1 + 2\n10 * 10");
    assert_eq!(m.result().and_then(Value::as_number), Some(100));

    let m = run("print 1");
    assert!(m.result().is_some_and(Value::is_void));
}

#[test]
fn programs_without_calls_complete_on_start() {
    let mut m = machine();
    let program = load(&m, "1 \"a [print 2]");
    m.start(&program);
    assert_eq!(m.state(), SessionState::Completed);
    assert_eq!(m.steps(), 0);
    assert_eq!(m.result().map(ToString::to_string), Some("[print 2]".to_string()));
}

#[test]
fn variadic_words_in_parens() {
    let m = run("print (sum 1 2 3 4)\nprint sum 1 2\nprint (list 1 \"a [2 3])");
    assert_eq!(output(&m), "10\n3\n[1 \"a [2 3]]\n");
}

#[test]
fn control_flow() {
    let m = run("repeat 3 [print 1]\nif 1 < 2 [print \"yes]\nif 2 < 1 [print \"no]\nifelse 1 > 2 [print \"a] [print \"b]");
    assert_eq!(output(&m), "1\n1\n1\nyes\nb\n");
}

#[test]
fn procedures_bind_arguments() {
    let m = run("to square :n\n  print :n * :n\nend\nsquare 7");
    assert_eq!(output(&m), "49\n");
    assert_eq!(m.words().defined_names(), vec!["square"]);
}

#[test]
fn procedure_value_is_its_last_item() {
    let m = run("to double :n\n  2 * :n\nend\nprint double 4");
    assert_eq!(output(&m), "8\n");
}

#[test]
fn locals_do_not_leak_out() {
    let m = run("to f :x\n  print :x\nend\nf 1\nprint :x");
    assert_eq!(output(&m), "1\n");
    assert_eq!(m.state(), SessionState::Errored);
    assert_eq!(error_text(&m), "NameError: x");
    assert_eq!(m.error().and_then(LogoError::line), Some(4));
}

#[test]
fn callees_do_not_see_caller_locals() {
    let m = run("to inner\n  print :y\nend\nto outer :y\n  inner\nend\nouter 5");
    assert_eq!(error_text(&m), "NameError: y");
}

#[test]
fn deep_recursion_completes() {
    let m = run("to count :n\n  if :n > 0 [count :n - 1]\nend\ncount 100000");
    assert_eq!(m.state(), SessionState::Completed, "{}", error_text(&m));
}

const DEEP_COUNT: &str = "to count :n\n  if :n > 0 [count :n - 1]\nend\ncount 200000";

#[test]
fn errors_deep_in_recursion_are_caught() {
    let m = run("to count :n\n  if :n = 0 [print :missing]\n  if :n > 0 [count :n - 1]\nend\ncount 100000");
    assert_eq!(m.state(), SessionState::Errored);
    assert_eq!(error_text(&m), "NameError: missing");
}

#[test]
fn budget_exhausted_deep_in_recursion() {
    let mut m = machine();
    let program = load(&m, DEEP_COUNT);
    m.start(&program);
    assert_eq!(m.run_to_completion(Some(350_000)), SessionState::Errored);
    assert_eq!(error_text(&m), "RuntimeError: 'step budget exhausted'");
}

#[test]
fn deep_paused_sessions_can_be_replaced() {
    let mut m = machine();
    let program = load(&m, DEEP_COUNT);
    let other = load(&m, "print 7");

    m.start(&program);
    for _ in 0..350_000 {
        m.step();
    }
    assert!(m.is_pending());
    m.start(&other);
    assert_eq!(m.run_to_completion(None), SessionState::Completed);
    assert_eq!(output(&m), "7\n");

    m.start(&program);
    for _ in 0..350_000 {
        m.step();
    }
    assert!(m.is_pending());
    m.reset();
    assert_eq!(m.state(), SessionState::Idle);
}

#[test]
fn long_loops_complete() {
    let m = run("repeat 100000 [1]");
    assert_eq!(m.state(), SessionState::Completed);
    assert_eq!(m.steps(), 1);
}

#[test]
fn stepping_matches_running() {
    let src = "to fact :n\n  ifelse :n < 2 [1] [:n * fact :n - 1]\nend\nprint fact 10\nrepeat 2 [print \"x]";

    let ran = run(src);

    let mut stepped = machine();
    let program = load(&stepped, src);
    stepped.start(&program);
    let mut visible = 0;
    while stepped.is_pending() {
        assert!(stepped.current_expression().is_some());
        stepped.step();
        visible += 1;
    }

    assert_eq!(stepped.state(), SessionState::Completed);
    assert_eq!(output(&stepped), "3628800\nx\nx\n");
    assert_eq!(output(&stepped), output(&ran));
    assert_eq!(stepped.steps(), ran.steps());
    assert_eq!(visible, ran.steps());
}

#[test]
fn arguments_are_reduced_before_their_call() {
    let mut m = machine();
    let program = load(&m, "print 1 + 2");
    m.start(&program);
    assert_eq!(m.current_expression().map(Expr::kind_name), Some("INFIX"));
    assert!(m.step());
    assert_eq!(m.current_expression().map(Expr::kind_name), Some("APPLY"));
    assert!(!m.step());
    assert_eq!(m.current_expression(), None);
    assert_eq!(output(&m), "3\n");
    // Stepping a finished session does nothing.
    assert!(!m.step());
    assert_eq!(m.state(), SessionState::Completed);
}

#[test]
fn no_value_arguments_are_runtime_errors() {
    let m = run("print 1\nprint print 2");
    assert_eq!(output(&m), "1\n2\n");
    let err = m.error().unwrap();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert!(err.to_string().ends_with("has no value'"), "{err}");
    assert_eq!(err.line(), Some(1));
}

#[test]
fn redefinition_takes_effect_for_later_calls() {
    let m = run("to foo\n  print 1\nend\nfoo\nto foo\n  print 2\nend\nfoo");
    assert_eq!(output(&m), "1\n2\n");
}

#[test]
fn stale_arity_is_a_runtime_error() {
    let mut m = machine();
    run_on(&mut m, "to foo :a\n  print :a\nend");
    let call = load(&m, "foo 1");
    run_on(&mut m, "to foo\n  print 5\nend");

    m.start(&call);
    assert_eq!(m.run_to_completion(None), SessionState::Errored);
    assert_eq!(error_text(&m), "RuntimeError: 'foo expects 0 argument(s), got 1'");
}

#[test]
fn definitions_survive_a_failed_session() {
    let mut m = machine();
    assert_eq!(run_on(&mut m, "to ok\n  print 1\nend\nprint :missing"), SessionState::Errored);
    assert_eq!(run_on(&mut m, "ok"), SessionState::Completed);
    assert_eq!(output(&m), "1\n");
}

#[test]
fn globals_persist_between_sessions() {
    let mut m = machine();
    m.globals().define("size", Value::Number(3));
    assert_eq!(run_on(&mut m, "print :size * 2"), SessionState::Completed);
    assert_eq!(output(&m), "6\n");
}

#[test]
fn arithmetic_errors() {
    let m = run("print 1\nprint 1 / 0");
    assert_eq!(error_text(&m), "RuntimeError: 'division by zero'");
    assert_eq!(m.error().and_then(LogoError::line), Some(1));

    let m = run("print 9223372036854775807 + 1");
    assert_eq!(error_text(&m), "RuntimeError: 'integer overflow'");

    let m = run("print \"a + 1");
    assert_eq!(error_text(&m), "RuntimeError: 'add expects a number, got word'");

    let m = run("repeat 2 3");
    assert_eq!(error_text(&m), "RuntimeError: 'repeat expects a list, got number'");
}

#[test]
fn step_budget() {
    let mut m = machine();
    let program = load(&m, "repeat 1000 [print 1]");
    m.start(&program);
    assert_eq!(m.run_to_completion(Some(10)), SessionState::Errored);
    assert_eq!(m.steps(), 10);
    assert_eq!(error_text(&m), "RuntimeError: 'step budget exhausted'");
}

#[test]
fn reset_forgets_definitions() {
    let mut m = machine();
    run_on(&mut m, "to foo\n  print 1\nend");
    let call = load(&m, "foo");
    m.globals().define("x", Value::Number(1));

    m.reset();
    assert_eq!(m.state(), SessionState::Idle);
    assert!(m.words().defined_names().is_empty());
    assert!(m.globals().lookup("x").is_none());

    m.start(&call);
    assert_eq!(m.run_to_completion(None), SessionState::Errored);
    assert_eq!(error_text(&m), "NameError: foo");
}

#[test]
fn host_primitives() {
    let moves = Rc::new(RefCell::new(Vec::new()));
    let mut m = machine();
    let log = Rc::clone(&moves);
    let forward = Primitive::value("forward", 1, move |_, args, _, _| {
        log.borrow_mut().extend(args[0].as_number());
        Ok(Value::Void)
    });
    m.words_mut().register(forward);

    assert_eq!(
        run_on(&mut m, "repeat 2 [forward 10 forward 5 * 2]"),
        SessionState::Completed
    );
    assert_eq!(*moves.borrow(), vec![10, 10, 10, 10]);
}
