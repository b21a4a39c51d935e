//! Error reporting for the Logo front end.
//!
//! Three error kinds cover every failure:
//! - `SyntaxError`: malformed token sequence, raised only by the parser
//! - `NameError`: unknown word at parse time, unbound variable at run time
//! - `RuntimeError`: an expression produced no usable value
//!
//! Errors are collected into [`LogoError`] and rendered as report lines
//! against the source text. Reports go to a [`Logger`], the sink supplied by
//! whoever started the run.

mod error;
mod logger;

pub use error::{ErrorKind, LogoError, NameError, RuntimeError, SyntaxError};
pub use logger::{Logger, StderrLogger};

/// Result type used throughout parsing and evaluation.
pub type LogoResult<T> = Result<T, LogoError>;
