#![allow(clippy::unwrap_used, reason = "tests unwrap successful parses")]

use std::rc::Rc;

use logo_diagnostic::ErrorKind;
use logo_ir::{export, InfixOp, Keywords, Signature, SignatureTable};
use logo_lexer::tokenize;
use pretty_assertions::assert_eq;

use super::*;

fn words() -> WordTable {
    let mut table = SignatureTable::default();
    let primitive = |narg, variadic| Signature::Primitive { narg, variadic };
    for name in ["forward", "right", "print"] {
        table.insert(name.into(), primitive(1, false));
    }
    table.insert("repeat".into(), primitive(2, false));
    table.insert("sum".into(), primitive(2, true));
    table.insert("list".into(), primitive(2, true));
    table.insert("pi".into(), primitive(0, false));
    WordTable::new(Rc::new(table))
}

fn parse_src(src: &str) -> LogoResult<Vec<Expr>> {
    parse(&tokenize(src), words())
}

fn roundtrip(src: &str) -> String {
    export(&parse_src(src).unwrap(), &Keywords::default())
}

#[test]
fn calls_take_their_arity() {
    let program = parse_src("forward 10 right 90").unwrap();
    assert_eq!(
        program,
        vec![
            Expr::apply("forward", vec![Expr::number(10, 0)], 0),
            Expr::apply("right", vec![Expr::number(90, 0)], 0),
        ]
    );
}

#[test]
fn nested_calls_and_lists() {
    let program = parse_src("repeat 4 [forward 10 right 90]").unwrap();
    assert_eq!(program.len(), 1);
    assert_eq!(roundtrip("repeat 4 [forward 10 right 90]"), "repeat 4 [forward 10 right 90]\n");
}

#[test]
fn literals() {
    let program = parse_src("print \"Hello print :x print pi").unwrap();
    assert_eq!(
        program,
        vec![
            Expr::apply("print", vec![Expr::word("Hello", 0)], 0),
            Expr::apply("print", vec![Expr::variable("x", 0)], 0),
            Expr::apply("print", vec![Expr::apply("pi", vec![], 0)], 0),
        ]
    );
}

#[test]
fn infix_is_regrouped() {
    assert_eq!(roundtrip("print 2 + 3 * 4"), "print 2 + 3 * 4\n");
    let program = parse_src("print 2 * 3 + 4").unwrap();
    let Expr::Apply(apply) = &program[0] else {
        panic!("expected apply");
    };
    let Expr::Infix(root) = &*apply.args[0] else {
        panic!("expected infix");
    };
    assert_eq!(root.op, InfixOp::Add);
}

#[test]
fn call_operand_absorbs_the_rest_of_the_chain() {
    // forward takes `1 + 2` as its argument.
    let program = parse_src("print 3 * forward 1 + 2").unwrap();
    let Expr::Apply(print) = &program[0] else {
        panic!("expected apply");
    };
    let Expr::Infix(mul) = &*print.args[0] else {
        panic!("expected infix");
    };
    assert_eq!(mul.op, InfixOp::Mul);
    assert!(matches!(&*mul.right, Expr::Apply(a) if a.name == "forward"));
}

#[test]
fn variadic_words_inside_parens() {
    let program = parse_src("print (sum 1 2 3 4)").unwrap();
    let Some(Expr::Paren(paren)) = program[0].child(0).map(|c| &**c) else {
        panic!("expected paren");
    };
    assert_eq!(paren.inner.child_count(), 4);

    // Outside parens the declared arity applies.
    let program = parse_src("print sum 1 2 forward 3").unwrap();
    assert_eq!(program.len(), 2);
}

#[test]
fn procedure_definitions_register_their_arity() {
    let src = "to square :size\n  repeat 4 [forward :size right 90]\nend\nsquare 10";
    let program = parse_src(src).unwrap();
    assert_eq!(program.len(), 2);
    let Expr::ProcedureDef(def) = &program[0] else {
        panic!("expected definition");
    };
    assert_eq!(def.name, "square");
    assert_eq!(def.arg_names, vec!["size".to_string()]);
    assert_eq!(program[1], Expr::apply("square", vec![Expr::number(10, 3)], 3));
}

#[test]
fn header_takes_every_leading_variable() {
    let program = parse_src("to area :w :h\n  print :w * :h\nend").unwrap();
    let Expr::ProcedureDef(def) = &program[0] else {
        panic!("expected definition");
    };
    assert_eq!(def.arg_names, vec!["w".to_string(), "h".to_string()]);
    assert_eq!(def.body.items.len(), 1);

    // A body that opens with a variable extends the header instead.
    let err = parse_src("to double :n\n  :n * 2\nend").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.to_string(), "SyntaxError: unexpected '*'");

    let program = parse_src("to double :n\n  2 * :n\nend").unwrap();
    let Expr::ProcedureDef(def) = &program[0] else {
        panic!("expected definition");
    };
    assert_eq!(def.arg_names, vec!["n".to_string()]);
}

#[test]
fn recursive_definition_resolves_itself() {
    let src = "to count :n\n  count :n - 1\nend";
    assert!(parse_src(src).is_ok());
}

#[test]
fn redefinition_changes_arity_for_later_calls() {
    let src = "to foo :a\nforward :a\nend\nfoo 1\nto foo\nforward 5\nend\nfoo forward 2";
    let program = parse_src(src).unwrap();
    assert_eq!(program.len(), 5);
    assert_eq!(program[3].child_count(), 0);
}

#[test]
fn unknown_word_is_a_name_error() {
    let err = parse_src("forward 10\njump 5").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
    assert_eq!(err.to_string(), "NameError: jump");
    assert_eq!(err.line(), Some(1));
}

#[test]
fn syntax_errors() {
    let cases = [
        ("forward", "SyntaxError: missing argument(s)"),
        ("repeat 4", "SyntaxError: missing argument(s)"),
        ("[forward 10", "SyntaxError: missing ']'"),
        ("print (forward 10", "SyntaxError: missing ')'"),
        ("print (1 2)", "SyntaxError: missing ')'"),
        ("to foo forward 1", "SyntaxError: missing 'end'"),
        ("to 5 end", "SyntaxError: missing procedure name"),
        (")", "SyntaxError: unexpected ')'"),
        ("print ]", "SyntaxError: missing argument(s)"),
        ("end", "SyntaxError: unexpected 'end'"),
        ("* 3", "SyntaxError: unexpected '*'"),
        ("print 1 +", "SyntaxError: missing argument(s)"),
    ];
    for (src, expected) in cases {
        let err = parse_src(src).unwrap_err();
        assert_eq!(err.to_string(), expected, "source: {src}");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }
}

#[test]
fn missing_paren_points_at_the_open_paren() {
    let err = parse_src("forward 1\nprint (forward 10").unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert_eq!(
        err.report("forward 1\nprint (forward 10"),
        vec!["SyntaxError: missing ')'", "  Line 2: print (forward 10"]
    );
}

#[test]
fn definitions_do_not_leak_into_the_shared_table() {
    let table = words();
    let tokens = tokenize("to foo end");
    let mut parser = Parser::new(&tokens, table.clone());
    parser.parse_program().unwrap();
    assert!(parser.into_words().local().contains_key("foo"));
    assert!(!table.contains("foo"));
}

#[test]
fn round_trips() {
    let sources = [
        "print 1 - 2 - 3",
        "print (2 + 3) * 4",
        "print (sum 1 2 3)",
        "print \"abc",
        "to tri :a :b\n  print :a * :b + 1\nend",
        "repeat 3 [print [1 2 [3]]]",
    ];
    for src in sources {
        let program = parse_src(src).unwrap();
        let exported = export(&program, &Keywords::default());
        let reparsed = parse_src(&exported).unwrap();
        assert!(
            logo_ir::same_items(&program, &reparsed),
            "round trip changed {src:?} into {exported:?}"
        );
    }
}
