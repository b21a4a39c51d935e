//! Evaluation tests through the facade: values, stepping, recursion,
//! redefinition and error reports.

use logo_eval::SessionState;
use logoc::RunOptions;
use pretty_assertions::assert_eq;

use crate::common::{logo, logo_with, run, run_on, step_through};

#[test]
fn infix_precedence() {
    let outcome = run("print 2 + 3 * 4\nprint 2 * 3 + 4\nprint 1 - 2 - 3\nprint (2 + 3) * 4");
    assert_eq!(outcome.output, "14\n10\n-4\n20\n");
    assert!(outcome.errors.is_empty());
}

#[test]
fn run_returns_the_last_value() {
    let outcome = run("3 * 4");
    assert_eq!(outcome.value.and_then(|v| v.as_number()), Some(12));
}

#[test]
fn stepping_matches_running() {
    let src = "to fib :n\n  ifelse :n < 2 [:n] [(fib :n - 1) + fib :n - 2]\nend\n\
               print fib 12\nrepeat 3 [print \"tick]\nprint :undefined";

    let ran = run(src);
    let (stepped_logo, stepped, _) = step_through(src);

    assert_eq!(ran.output, "144\ntick\ntick\ntick\n");
    assert_eq!(stepped.output, ran.output);
    assert_eq!(stepped.errors, ran.errors);
    assert_eq!(
        ran.errors,
        vec!["NameError: undefined", "  Line 6: print :undefined"]
    );
    assert_eq!(stepped_logo.words().defined_names(), vec!["fib"]);
}

#[test]
fn hundred_thousand_deep_recursion() {
    let src = "to count :n\n  if :n > 0 [count :n - 1]\nend\ncount 100000";

    let (logo, stepped, steps) = step_through(src);
    assert_eq!(logo.state(), SessionState::Completed);
    assert!(stepped.errors.is_empty());
    assert!(steps > 100_000);

    let ran = run(src);
    assert!(ran.errors.is_empty());
    assert!(ran.value.is_some());
}

#[test]
fn redefinition_uses_the_latest_body_and_arity() {
    let mut logo = logo();
    let first = run_on(&mut logo, "to foo :a\n  print :a\nend\nfoo 1");
    assert_eq!(first.output, "1\n");

    let second = run_on(&mut logo, "to foo\n  print 2\nend\nfoo");
    assert_eq!(second.output, "2\n");

    // Later parses see the new arity.
    let third = run_on(&mut logo, "foo foo");
    assert_eq!(third.output, "2\n2\n");
    assert!(third.errors.is_empty());
}

#[test]
fn unbound_variable() {
    let outcome = run("to show\n  print :x\nend\nshow");
    assert_eq!(outcome.errors, vec!["NameError: x", "  Line 2:   print :x"]);
}

#[test]
fn runtime_error_reports_the_offending_line() {
    let outcome = run("print 1\nprint 1 / 0");
    assert_eq!(outcome.output, "1\n");
    assert_eq!(
        outcome.errors,
        vec!["RuntimeError: 'division by zero'", "  Line 2: print 1 / 0"]
    );
}

#[test]
fn failed_runs_keep_their_definitions() {
    let mut logo = logo();
    let failed = run_on(&mut logo, "to ok\n  print 1\nend\nprint :nope");
    assert_eq!(failed.errors.len(), 2);
    let again = run_on(&mut logo, "ok");
    assert_eq!(again.output, "1\n");
}

#[test]
fn step_budget_stops_long_runs() {
    let options = RunOptions {
        max_steps: Some(5),
        ..RunOptions::default()
    };
    let mut logo = logo_with(options);
    let outcome = run_on(&mut logo, "repeat 100 [print 1]");
    assert!(outcome.value.is_none());
    assert_eq!(outcome.output.lines().count(), 4);
    assert_eq!(outcome.errors[0], "RuntimeError: 'step budget exhausted'");
}

#[test]
fn current_expression_follows_the_steps() {
    let mut logo = logo();
    let mut errors = Vec::new();
    logo.import("print 1 + 2").unwrap();
    assert!(logo.start_program(&mut errors));

    let current = logo.current_expression().map(|e| logo.export(std::slice::from_ref(e)));
    assert_eq!(current.as_deref(), Some("1 + 2\n"));
    assert!(logo.step(&mut errors));
    let current = logo.current_expression().map(|e| logo.export(std::slice::from_ref(e)));
    assert_eq!(current.as_deref(), Some("print 1 + 2\n"));
    assert!(!logo.step(&mut errors));
    assert!(!logo.step(&mut errors));
    assert!(errors.is_empty());
}
