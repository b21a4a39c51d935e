//! Debug commands: `lex` and `parse` for inspecting the front end.

use logo_ir::path::{get, paths};
use logo_ir::Expr;

use logo_lexer::tokenize_with;

use super::{import_file, read_file};
use crate::RunOptions;

/// Tokenize a file and print the token stream.
pub fn lex_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let tokens = tokenize_with(&source, &options.keywords);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {token}");
    }
}

/// Parse a file and print its tree, one node per line, with node paths.
pub fn parse_file(path: &str, options: &RunOptions) {
    let logo = import_file(path, options);
    let program = logo.program();

    println!("Parse result for '{path}' ({} expressions):", program.len());
    for node_path in paths(program) {
        let Some(expr) = get(program, &node_path) else {
            continue;
        };
        let depth = node_path.indices().len();
        let line = expr
            .line()
            .map(|line| format!(" @{}", line + 1))
            .unwrap_or_default();
        println!(
            "{:indent$}{node_path} {}{line}",
            "",
            describe(expr),
            indent = depth * 2
        );
    }
}

/// One-line description of a node, without its children.
pub fn describe(expr: &Expr) -> String {
    let kind = expr.kind_name();
    match expr {
        Expr::Nil | Expr::List(_) | Expr::Paren(_) => kind.to_string(),
        Expr::Number(n) => format!("{kind} {}", n.value),
        Expr::Word(w) => format!("{kind} \"{}", w.text),
        Expr::Variable(v) => format!("{kind} :{}", v.name),
        Expr::ProcedureDef(def) => {
            let mut text = format!("{kind} {}", def.name);
            for arg in &def.arg_names {
                text.push_str(" :");
                text.push_str(arg);
            }
            text
        }
        Expr::Apply(apply) => format!("{kind} {}/{}", apply.name, apply.args.len()),
        Expr::Infix(infix) => format!("{kind} {}", infix.op),
    }
}
