//! Procedure definitions: `to name :arg ... body ... end`.

use std::rc::Rc;

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{Expr, List, ProcedureDef, Token, TokenKind};
use tracing::debug;

use crate::Parser;

impl Parser<'_> {
    /// Parse a definition after its `to` token.
    ///
    /// The header is registered before the body is parsed so the body can
    /// call the procedure recursively.
    pub(crate) fn parse_procedure(&mut self, to: &Token) -> LogoResult<Expr> {
        let name = match self.next() {
            Some(t) if t.kind == TokenKind::Word => t.text.clone(),
            other => {
                return Err(LogoError::syntax(
                    "missing procedure name",
                    Some(other.unwrap_or(to)),
                ))
            }
        };

        let mut arg_names = Vec::new();
        while let Some(t) = self.peek().filter(|t| t.kind == TokenKind::Variable) {
            self.next();
            arg_names.push(t.text.trim_start_matches(':').to_string());
        }

        debug!(name = %name, arity = arg_names.len(), "procedure header");
        self.define_word(&name, &arg_names);

        let mut items = Vec::new();
        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::ProcEnd) => break,
                Some(_) => items.push(Rc::new(self.parse_expr(false)?)),
                None => return Err(LogoError::syntax("missing 'end'", Some(to))),
            }
        }
        self.next();

        Ok(Expr::ProcedureDef(ProcedureDef {
            name,
            arg_names,
            body: List {
                items,
                line: to.line,
            },
            line: to.line,
        }))
    }
}
