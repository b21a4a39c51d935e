//! Recursive descent parser for Logo.
//!
//! Logo has no call syntax: `forward 10 right 90` is two calls only because
//! `forward` and `right` each take one argument. The parser therefore needs
//! the arity of every word it meets, which it reads from a [`WordTable`].
//! Procedure definitions add their own arity to the table as soon as their
//! header is parsed, so recursive and later calls resolve.
//!
//! Infix operators are first parsed into a flat right-leaning chain and then
//! regrouped by [`reorder_infix`] according to operator priority.

mod cursor;
mod grammar;
mod reorder;
mod words;

pub use cursor::Cursor;
pub use reorder::reorder_infix;
pub use words::WordTable;

use logo_diagnostic::LogoResult;
use logo_ir::{Expr, Token, TokenList};
use tracing::debug;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    words: WordTable,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, words: WordTable) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            words,
        }
    }

    #[inline]
    fn next(&mut self) -> Option<&'a Token> {
        self.cursor.next()
    }

    #[inline]
    fn peek(&self) -> Option<&'a Token> {
        self.cursor.peek()
    }

    /// Parse every top-level expression and regroup its infix chains.
    pub fn parse_program(&mut self) -> LogoResult<Vec<Expr>> {
        let mut program = Vec::new();
        while !self.cursor.is_at_end() {
            let expr = self.parse_expr(false)?;
            program.push(reorder_infix(expr));
        }
        Ok(program)
    }

    /// Word table after parsing, including procedures defined by the input.
    pub fn into_words(self) -> WordTable {
        self.words
    }
}

/// Parse a token stream against a snapshot of the word registry.
///
/// Fails on the first error; no partial program is returned.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(tokens: &TokenList, words: WordTable) -> LogoResult<Vec<Expr>> {
    let mut parser = Parser::new(tokens, words);
    let program = parser.parse_program()?;
    debug!(exprs = program.len(), "parsed");
    Ok(program)
}

#[cfg(test)]
mod tests;
