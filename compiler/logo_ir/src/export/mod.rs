//! Serialization of expression trees back to source text.
//!
//! Export inserts only the parentheses needed to preserve the tree: explicit
//! `Paren` nodes, an infix operand whose operator binds more loosely than
//! its parent's, and a call with arguments that would otherwise swallow a
//! following infix operator. Exporting a parsed program and parsing the
//! result again gives a structurally equal program.

use std::rc::Rc;

use logo_stack::ensure_sufficient_stack;

use crate::{Apply, Expr, Infix, Keywords};

/// Export a program, one top-level expression per line.
pub fn export(program: &[Expr], keywords: &Keywords) -> String {
    let mut exporter = Exporter::new(keywords);
    for expr in program {
        exporter.expr(expr, true);
        exporter.out.push('\n');
    }
    exporter.out
}

/// Export a single expression without a trailing newline.
pub fn export_expr(expr: &Expr, keywords: &Keywords) -> String {
    let mut exporter = Exporter::new(keywords);
    exporter.expr(expr, true);
    exporter.out
}

struct Exporter<'a> {
    keywords: &'a Keywords,
    out: String,
}

impl<'a> Exporter<'a> {
    fn new(keywords: &'a Keywords) -> Self {
        Exporter {
            keywords,
            out: String::new(),
        }
    }

    /// `trailing` is false when an infix operator will follow this text.
    fn expr(&mut self, expr: &Expr, trailing: bool) {
        ensure_sufficient_stack(|| self.expr_inner(expr, trailing));
    }

    fn expr_inner(&mut self, expr: &Expr, trailing: bool) {
        match expr {
            Expr::Nil => {}
            // `-` always tokenizes as an operator, so a negative literal is
            // written as a subtraction from zero.
            Expr::Number(n) if n.value < 0 => {
                self.out.push_str("(0 - ");
                match n.value.checked_neg() {
                    Some(magnitude) => self.out.push_str(&magnitude.to_string()),
                    None => {
                        self.out.push_str(&i64::MAX.to_string());
                        self.out.push_str(" - 1");
                    }
                }
                self.out.push(')');
            }
            Expr::Number(n) => self.out.push_str(&n.value.to_string()),
            Expr::Word(w) => {
                self.out.push('"');
                self.out.push_str(&w.text);
            }
            Expr::Variable(v) => {
                self.out.push(':');
                self.out.push_str(&v.name);
            }
            Expr::List(list) => {
                self.out.push('[');
                self.sequence(&list.items);
                self.out.push(']');
            }
            Expr::ProcedureDef(def) => {
                self.out.push_str(self.keywords.to_word());
                self.out.push(' ');
                self.out.push_str(&def.name);
                for arg in &def.arg_names {
                    self.out.push_str(" :");
                    self.out.push_str(arg);
                }
                self.out.push('\n');
                for item in &def.body.items {
                    self.out.push_str("  ");
                    self.expr(item, true);
                    self.out.push('\n');
                }
                self.out.push_str(self.keywords.end_word());
            }
            Expr::Apply(apply) => {
                if apply.args.is_empty() || trailing {
                    self.apply(apply);
                } else {
                    self.out.push('(');
                    self.apply(apply);
                    self.out.push(')');
                }
            }
            Expr::Infix(infix) => self.infix(infix, trailing),
            Expr::Paren(paren) => {
                self.out.push('(');
                self.expr(&paren.inner, true);
                self.out.push(')');
            }
        }
    }

    fn sequence(&mut self, items: &[Rc<Expr>]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.expr(item, true);
        }
    }

    fn apply(&mut self, apply: &Apply) {
        self.out.push_str(&apply.name);
        for arg in &apply.args {
            self.out.push(' ');
            self.expr(arg, true);
        }
    }

    fn infix(&mut self, infix: &Infix, trailing: bool) {
        let priority = infix.op.priority();

        match &*infix.left {
            Expr::Infix(left) if left.op.priority() < priority => {
                self.out.push('(');
                self.infix(left, true);
                self.out.push(')');
            }
            left => self.expr(left, false),
        }

        self.out.push(' ');
        self.out.push_str(infix.op.symbol());
        self.out.push(' ');

        match &*infix.right {
            Expr::Infix(right) if right.op.priority() <= priority => {
                self.out.push('(');
                self.infix(right, true);
                self.out.push(')');
            }
            right => self.expr(right, trailing),
        }
    }
}
