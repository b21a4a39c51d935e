//! Byte-level scanner.
//!
//! Every delimiter is ASCII, so token boundaries always fall on UTF-8
//! character boundaries and slicing `source` at them is safe.

use logo_ir::{Keywords, Token, TokenKind};

/// Ends symbols: whitespace, brackets, parens, comment start.
#[inline]
fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'[' | b']' | b'(' | b')' | b';')
}

#[inline]
fn is_infix_op(b: u8) -> bool {
    matches!(b, b'+' | b'-' | b'*' | b'/' | b'=' | b'<' | b'>')
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

pub(crate) struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    /// 0-based line of `pos`.
    line: u32,
    keywords: &'a Keywords,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, keywords: &'a Keywords) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 0,
            keywords,
        }
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    #[inline]
    fn current(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) {
        while let Some(b) = self.current() {
            if b == b'\n' {
                self.line += 1;
                self.pos += 1;
            } else if is_whitespace(b) {
                self.pos += 1;
            } else if b == b';' {
                // Stop on the newline so the line counter sees it.
                let rest = &self.bytes()[self.pos..];
                self.pos += memchr::memchr(b'\n', rest).unwrap_or(rest.len());
            } else {
                break;
            }
        }
    }

    /// End of the run starting at `start + 1` that stops at `stop`.
    fn run_end(&self, start: usize, stop: impl Fn(u8) -> bool) -> usize {
        let bytes = self.bytes();
        let mut end = start + 1;
        while end < bytes.len() && !stop(bytes[end]) {
            end += 1;
        }
        end
    }

    pub(crate) fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let start = self.pos;
        let first = self.current()?;

        let (kind, end) = match first {
            b'[' => (TokenKind::BracketOpen, start + 1),
            b']' => (TokenKind::BracketClose, start + 1),
            b'(' => (TokenKind::ParenOpen, start + 1),
            b')' => (TokenKind::ParenClose, start + 1),
            b'"' => (TokenKind::Symbol, self.run_end(start, is_delimiter)),
            b':' => (
                TokenKind::Variable,
                self.run_end(start, |b| is_delimiter(b) || is_infix_op(b)),
            ),
            b if is_infix_op(b) => (TokenKind::InfixOp, start + 1),
            _ => {
                let end = self.run_end(start, |b| is_delimiter(b) || is_infix_op(b));
                (self.classify(&self.source[start..end]), end)
            }
        };

        self.pos = end;
        let raw = &self.source[start..end];
        let text = match kind {
            TokenKind::Word | TokenKind::ProcTo | TokenKind::ProcEnd => raw.to_lowercase(),
            _ => raw.to_string(),
        };
        Some(Token::new(kind, text, self.line))
    }

    fn classify(&self, raw: &str) -> TokenKind {
        if raw.bytes().all(|b| b.is_ascii_digit()) && raw.parse::<i64>().is_ok() {
            return TokenKind::Number;
        }
        let lower = raw.to_lowercase();
        if self.keywords.is_to(&lower) {
            TokenKind::ProcTo
        } else if self.keywords.is_end(&lower) {
            TokenKind::ProcEnd
        } else {
            TokenKind::Word
        }
    }
}
