//! Tokenizer for Logo source text.
//!
//! Tokenizing is total: every input produces a token stream, possibly empty.
//! Anything that is not punctuation, a prefixed form, a number or a keyword
//! becomes a `Word` token, and whether that word exists is decided later by
//! the parser.
//!
//! # Token Rules
//!
//! - Whitespace (space, tab, `\n`, `\r`) separates tokens; `\n` advances the
//!   line counter.
//! - `;` starts a comment that runs to the end of the line.
//! - `[ ] ( )` are single-character tokens.
//! - `"word` is a `Symbol`; it ends at whitespace, brackets, parens or `;`.
//! - `:name` is a `Variable`; it also ends at an infix operator.
//! - `+ - * / = < >` are single-character `InfixOp` tokens.
//! - Any other run ends at a delimiter or infix operator and is a `Number`
//!   if it is all digits, `ProcTo` / `ProcEnd` if it spells a keyword, and a
//!   `Word` otherwise.

mod scanner;

use logo_ir::{Keywords, TokenList};
use tracing::debug;

use scanner::Scanner;

/// Tokenize with the default `to` / `end` keywords.
pub fn tokenize(source: &str) -> TokenList {
    tokenize_with(source, &Keywords::default())
}

/// Tokenize, accepting the localized keyword spellings in `keywords`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn tokenize_with(source: &str, keywords: &Keywords) -> TokenList {
    let mut tokens = TokenList::new();
    let mut scanner = Scanner::new(source, keywords);
    while let Some(token) = scanner.next_token() {
        tokens.push(token);
    }
    debug!(count = tokens.len(), "tokenized");
    tokens
}
