//! Front end tests: tokenizer laws, parse arity, export round trips.

use logo_diagnostic::ErrorKind;
use logo_ir::{same_items, Expr, Keywords, TokenKind};
use logoc::RunOptions;
use pretty_assertions::assert_eq;

use crate::common::{logo, logo_with};

#[test]
fn comments_and_whitespace_yield_nothing() {
    let logo = logo();
    assert!(logo.tokenize("  \n\t ; just a comment\n\r\n").is_empty());
}

#[test]
fn comments_do_not_shift_lines() {
    let logo = logo();
    let tokens = logo.tokenize("; header\nforward 10 ; move\n\nright 90");
    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 3, 3]);
    assert_eq!(
        tokens.kinds(),
        vec![TokenKind::Word, TokenKind::Number, TokenKind::Word, TokenKind::Number]
    );
}

#[test]
fn apply_arity_matches_the_word() {
    let mut logo = logo();
    logo.import("to tri :a :b :c\n  print :a\nend\ntri 1 2 3\nprint sum 1 2")
        .unwrap();
    let program = logo.program();
    assert_eq!(program[1].child_count(), 3);
    let Expr::Apply(print) = &program[2] else {
        panic!("expected a call");
    };
    assert_eq!(print.args[0].child_count(), 2);
}

#[test]
fn too_few_arguments_is_a_syntax_error() {
    let mut logo = logo();
    let err = logo.import("to tri :a :b :c\nend\ntri 1 2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.to_string(), "SyntaxError: missing argument(s)");
    assert!(logo.program().is_empty());
}

#[test]
fn parse_errors_are_reported_with_their_line() {
    let mut logo = logo();
    let mut errors = Vec::new();
    assert!(logo.run("print 1\nprint (sum 1 2", &mut errors).is_none());
    assert_eq!(
        errors,
        vec!["SyntaxError: missing ')'", "  Line 2: print (sum 1 2"]
    );
}

#[test]
fn export_round_trips() {
    let sources = [
        "print 2 + 3 * 4",
        "print (2 + 3) * 4",
        "print 1 - (2 - 3)",
        "print 10 / 5 / 2",
        "print 1 < 2 = \"true",
        "to square :n\n  repeat 4 [print :n]\nend\nsquare 5",
        "print (sum 1 2 3)\nprint (list \"a [1 2] 3)",
        "ifelse 1 > 2 [print \"big] [print \"small]",
    ];
    for src in sources {
        let mut logo = logo();
        logo.import(src).unwrap();
        let original = logo.program().to_vec();
        let exported = logo.export(&original);

        let mut again = crate::common::logo();
        again.import(&exported).unwrap();
        assert!(
            same_items(&original, again.program()),
            "{src:?} exported as {exported:?}"
        );
        assert_eq!(again.export(again.program()), exported);
    }
}

#[test]
fn localized_keywords() {
    let options = RunOptions {
        keywords: Keywords::localized(Some("pour"), Some("fin")),
        ..RunOptions::default()
    };
    let mut logo = logo_with(options);
    logo.import("pour double :n\n  2 * :n\nfin\nto half :n\n  100 / :n\nend")
        .unwrap();
    assert_eq!(
        logo.export(logo.program()),
        "pour double :n\n  2 * :n\nfin\npour half :n\n  100 / :n\nfin\n"
    );
}
