use std::fmt;

use logo_ir::{Expr, Token};

use crate::Logger;

/// Tag for the three error kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Name,
    Runtime,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Runtime => "RuntimeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Malformed token sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// Offending token; `None` when input ran out.
    pub token: Option<Token>,
}

/// Reference to an unknown word or an unbound variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameError {
    /// Word or variable name, without any prefix character.
    pub name: String,
    pub line: Option<u32>,
}

/// An expression evaluated to something unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
    pub expr: Option<Box<Expr>>,
}

/// Any error raised while parsing or evaluating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoError {
    Syntax(SyntaxError),
    Name(NameError),
    Runtime(RuntimeError),
}

impl LogoError {
    pub fn syntax(message: impl Into<String>, token: Option<&Token>) -> Self {
        LogoError::Syntax(SyntaxError {
            message: message.into(),
            token: token.cloned(),
        })
    }

    pub fn name(name: impl Into<String>, line: Option<u32>) -> Self {
        LogoError::Name(NameError {
            name: name.into(),
            line,
        })
    }

    pub fn runtime(message: impl Into<String>, expr: Option<&Expr>) -> Self {
        LogoError::Runtime(RuntimeError {
            message: message.into(),
            expr: expr.map(|e| Box::new(e.clone())),
        })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LogoError::Syntax(_) => ErrorKind::Syntax,
            LogoError::Name(_) => ErrorKind::Name,
            LogoError::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// 0-based source line the error points at, if known.
    pub fn line(&self) -> Option<u32> {
        match self {
            LogoError::Syntax(e) => e.token.as_ref().map(|t| t.line),
            LogoError::Name(e) => e.line,
            LogoError::Runtime(e) => e.expr.as_deref().and_then(Expr::line),
        }
    }

    /// Report lines: the headline, then the offending source line when
    /// both the line number and its text are available.
    pub fn report(&self, source: &str) -> Vec<String> {
        let mut lines = vec![self.to_string()];
        if let Some(line) = self.line() {
            if let Some(text) = source.lines().nth(line as usize) {
                lines.push(format!("  Line {}: {}", line + 1, text));
            }
        }
        lines
    }

    /// Send every report line to `logger`.
    pub fn log_to(&self, source: &str, logger: &mut dyn Logger) {
        for line in self.report(source) {
            logger.error(&line);
        }
    }
}

impl fmt::Display for LogoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoError::Syntax(e) => write!(f, "SyntaxError: {}", e.message),
            LogoError::Name(e) => write!(f, "NameError: {}", e.name),
            LogoError::Runtime(e) => write!(f, "RuntimeError: '{}'", e.message),
        }
    }
}

impl std::error::Error for LogoError {}

impl From<SyntaxError> for LogoError {
    fn from(e: SyntaxError) -> Self {
        LogoError::Syntax(e)
    }
}

impl From<NameError> for LogoError {
    fn from(e: NameError) -> Self {
        LogoError::Name(e)
    }
}

impl From<RuntimeError> for LogoError {
    fn from(e: RuntimeError) -> Self {
        LogoError::Runtime(e)
    }
}
