//! Editing a loaded program through tree paths, then running it again.

use logo_ir::path::{delete, get, paths, replace};
use logo_ir::{Expr, ExprPath};
use pretty_assertions::assert_eq;

use crate::common::logo;

#[test]
fn paths_cover_every_node() {
    let mut logo = logo();
    logo.import("print 1 + 2").unwrap();
    let listed: Vec<String> = paths(logo.program()).iter().map(ToString::to_string).collect();
    assert_eq!(listed, vec!["0", "0.0", "0.0.0", "0.0.1"]);
}

#[test]
fn replace_then_run() {
    let mut logo = logo();
    logo.import("print 1 + 2").unwrap();

    let path = ExprPath::from_indices(vec![0, 0]);
    let old = replace(logo.program_mut(), &path, Expr::number(7, 0));
    assert_eq!(old.map(|e| e.kind_name()), Some("INFIX"));

    let mut errors = Vec::new();
    logo.run_program(&mut errors);
    assert_eq!(logo.machine().printer().output(), "7\n");
    assert_eq!(logo.export(logo.program()), "print 7\n");
}

#[test]
fn edited_negative_numbers_reload() {
    let mut logo = logo();
    logo.import("print 1 + 2").unwrap();
    replace(logo.program_mut(), &ExprPath::from_indices(vec![0, 0, 0]), Expr::number(-5, 0));

    let exported = logo.export(logo.program());
    assert_eq!(exported, "print (0 - 5) + 2\n");

    let mut errors = Vec::new();
    let value = logo.run(&exported, &mut errors);
    assert_eq!(errors, Vec::<String>::new());
    assert!(value.is_some());
    assert_eq!(logo.machine().printer().output(), "-3\n");
}

#[test]
fn delete_statement_and_argument() {
    let mut logo = logo();
    logo.import("print 1\nprint 5").unwrap();

    let removed = delete(logo.program_mut(), &ExprPath::top(0));
    assert!(removed.is_some());
    assert_eq!(logo.program().len(), 1);

    let arg = ExprPath::from_indices(vec![0, 0]);
    delete(logo.program_mut(), &arg);
    assert!(get(logo.program(), &arg).is_some_and(Expr::is_nil));
    assert_eq!(logo.export(logo.program()), "print \n");
}

#[test]
fn edits_while_paused_do_not_disturb_the_session() {
    let mut logo = logo();
    let mut errors = Vec::new();
    logo.import("print 1\nprint 2 + 3").unwrap();
    assert!(logo.start_program(&mut errors));

    replace(logo.program_mut(), &ExprPath::from_indices(vec![1, 0]), Expr::number(9, 1));
    while logo.step(&mut errors) {}

    assert!(errors.is_empty());
    assert_eq!(logo.machine().printer().output(), "1\n5\n");

    // The edit applies from the next run on.
    logo.machine().printer().clear();
    logo.run_program(&mut errors);
    assert_eq!(logo.machine().printer().output(), "1\n9\n");
}
