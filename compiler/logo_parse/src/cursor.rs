//! Token cursor for navigating the token stream.

use logo_ir::{Token, TokenKind, TokenList};
use tracing::trace;

/// Forward-only cursor over a token list.
///
/// Unlike a sentinel-terminated stream, running off the end is an ordinary
/// state: `next` and `peek` return `None`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position in the token stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Look at the next token without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Whether the next token has the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume and return the next token.
    pub fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        trace!(pos = self.pos, kind = %token.kind, text = %token.text, "advance");
        self.pos += 1;
        Some(token)
    }
}
