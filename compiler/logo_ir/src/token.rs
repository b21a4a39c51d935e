//! Tokens produced by the tokenizer.

use std::fmt;
use std::ops::Index;

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `"word` - a quoted word.
    Symbol,
    /// `:name` - a variable reference.
    Variable,
    /// One of `+ - * / = < >`.
    InfixOp,
    /// A base-10 integer literal.
    Number,
    /// The `to` keyword (or its localized spelling).
    ProcTo,
    /// The `end` keyword (or its localized spelling).
    ProcEnd,
    /// Anything else: a word name, resolved at parse time.
    Word,
}

impl TokenKind {
    /// Upper-case name used in token dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::BracketOpen => "BRACKET-OPEN",
            TokenKind::BracketClose => "BRACKET-CLOSE",
            TokenKind::ParenOpen => "PAREN-OPEN",
            TokenKind::ParenClose => "PAREN-CLOSE",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Variable => "VARIABLE",
            TokenKind::InfixOp => "INFIX-OP",
            TokenKind::Number => "NUMBER",
            TokenKind::ProcTo => "PROC-TO",
            TokenKind::ProcEnd => "PROC-END",
            TokenKind::Word => "WORD",
        }
    }

    /// Tokens that close an enclosing construct and can never start an
    /// expression.
    #[inline]
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::BracketClose | TokenKind::ParenClose | TokenKind::ProcEnd
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexical unit. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. Prefix characters (`"`, `:`) are kept;
    /// word-like tokens are lower-cased.
    pub text: String,
    /// 0-based source line.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.line, self.kind, self.text)
    }
}

/// The token stream handed from the tokenizer to the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kinds only, in order. Handy for assertions and dumps.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
