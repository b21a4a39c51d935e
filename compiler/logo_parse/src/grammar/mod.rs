//! Expression grammar.
//!
//! ```text
//! expr      := primary (INFIX-OP primary)*
//! primary   := '(' expr ')'
//!            | '[' expr* ']'
//!            | TO WORD VARIABLE* expr* END
//!            | NUMBER | VARIABLE | SYMBOL
//!            | WORD expr{arity}
//! ```
//!
//! The infix tail is collected into a right-leaning chain; priorities are
//! applied afterwards by [`crate::reorder_infix`].

mod procedure;

use std::rc::Rc;

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{Expr, InfixOp, List, Signature, Token, TokenKind};
use logo_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::Parser;

const MISSING_ARGUMENTS: &str = "missing argument(s)";

impl Parser<'_> {
    /// Parse one expression: a primary and any infix tail.
    ///
    /// `in_paren` is set only for the expression written directly inside
    /// `( ... )`, where variadic words take every argument up to the
    /// closing paren.
    pub(crate) fn parse_expr(&mut self, in_paren: bool) -> LogoResult<Expr> {
        ensure_sufficient_stack(|| self.parse_expr_inner(in_paren))
    }

    fn parse_expr_inner(&mut self, in_paren: bool) -> LogoResult<Expr> {
        let first = self.parse_primary(in_paren)?;

        let mut operands = vec![first];
        let mut ops: Vec<(InfixOp, u32)> = Vec::new();
        while let Some(token) = self.peek().filter(|t| t.kind == TokenKind::InfixOp) {
            self.next();
            let op = InfixOp::from_symbol(&token.text)
                .ok_or_else(|| LogoError::syntax(format!("unexpected '{}'", token.text), Some(token)))?;
            if self.peek().is_none() {
                return Err(LogoError::syntax(MISSING_ARGUMENTS, Some(token)));
            }
            ops.push((op, token.line));
            operands.push(self.parse_primary(false)?);
        }

        if ops.is_empty() {
            return Ok(operands.pop().unwrap_or(Expr::Nil));
        }
        trace!(operators = ops.len(), "infix chain");

        // a op1 (b op2 (c ...)), folded from the right.
        let mut chain = operands.pop().unwrap_or(Expr::Nil);
        while let (Some((op, line)), Some(left)) = (ops.pop(), operands.pop()) {
            chain = Expr::infix(op, left, chain, line);
        }
        Ok(chain)
    }

    fn parse_primary(&mut self, in_paren: bool) -> LogoResult<Expr> {
        let Some(token) = self.next() else {
            return Err(LogoError::syntax("no more token", None));
        };
        trace!(kind = %token.kind, text = %token.text, line = token.line, "primary");

        match token.kind {
            TokenKind::ParenOpen => {
                let inner = self.parse_expr(true)?;
                match self.next() {
                    Some(close) if close.kind == TokenKind::ParenClose => {
                        Ok(Expr::paren(inner, token.line))
                    }
                    _ => Err(LogoError::syntax("missing ')'", Some(token))),
                }
            }
            TokenKind::BracketOpen => {
                let mut items = Vec::new();
                loop {
                    match self.peek().map(|t| t.kind) {
                        Some(TokenKind::BracketClose) => break,
                        Some(_) => items.push(Rc::new(self.parse_expr(false)?)),
                        None => return Err(LogoError::syntax("missing ']'", Some(token))),
                    }
                }
                self.next();
                Ok(Expr::List(List {
                    items,
                    line: token.line,
                }))
            }
            TokenKind::ProcTo => self.parse_procedure(token),
            TokenKind::Number => token
                .text
                .parse::<i64>()
                .map(|value| Expr::number(value, token.line))
                .map_err(|_| LogoError::syntax(format!("invalid number '{}'", token.text), Some(token))),
            TokenKind::Variable => Ok(Expr::variable(strip_prefix(&token.text, ':'), token.line)),
            TokenKind::Symbol => Ok(Expr::word(strip_prefix(&token.text, '"'), token.line)),
            TokenKind::Word => self.parse_apply(token, in_paren),
            TokenKind::BracketClose
            | TokenKind::ParenClose
            | TokenKind::ProcEnd
            | TokenKind::InfixOp => Err(LogoError::syntax(
                format!("unexpected '{}'", token.text),
                Some(token),
            )),
        }
    }

    /// A call: the word followed by as many arguments as its arity.
    fn parse_apply(&mut self, token: &Token, in_paren: bool) -> LogoResult<Expr> {
        let Some(signature) = self.words.get(&token.text) else {
            return Err(LogoError::name(token.text.clone(), Some(token.line)));
        };
        let (arity, variadic) = (signature.arity(), signature.is_variadic());

        let mut args = Vec::new();
        if in_paren && variadic {
            while self.peek().is_some_and(|t| t.kind != TokenKind::ParenClose) {
                args.push(self.parse_expr(false)?);
            }
        } else {
            for _ in 0..arity {
                if self.peek().map_or(true, |t| t.kind.is_closer()) {
                    return Err(LogoError::syntax(MISSING_ARGUMENTS, Some(token)));
                }
                args.push(self.parse_expr(false)?);
            }
        }

        Ok(Expr::apply(token.text.clone(), args, token.line))
    }

    fn define_word(&mut self, name: &str, arg_names: &[String]) {
        self.words.define(
            name,
            Signature::Defined {
                arg_names: arg_names.to_vec(),
            },
        );
    }
}

fn strip_prefix(text: &str, prefix: char) -> &str {
    text.strip_prefix(prefix).unwrap_or(text)
}
