//! Logo Eval - stepping evaluator for Logo programs.
//!
//! Programs are evaluated in continuation-passing style on an explicit
//! trampoline, so a run can be paused after any word application and
//! resumed later, and deep Logo recursion never grows the host stack.
//!
//! # Architecture
//!
//! - [`Machine`]: the session driver. It owns the word registry, the global
//!   scope and the print handler, and runs a program either one visible step
//!   at a time ([`Machine::step`]) or to completion.
//! - [`eval`] / [`eval_block`]: the evaluation rules.
//! - [`Step`] / [`Pending`]: what every evaluation function hands back to
//!   the driver.
//! - [`WordRegistry`]: primitives and user-defined procedures. Its signature
//!   table is what the parser uses to resolve arities.
//! - [`Env`]: two-level variable scoping (globals, one scope per call).

mod environment;
mod eval;
mod machine;
mod primitives;
mod print_handler;
mod trampoline;
mod value;
mod words;

pub use environment::{Env, LocalScope, Scope};
pub use eval::{eval, eval_block};
pub use machine::{Machine, SessionState};
pub use primitives::register_core_words;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use trampoline::{Cont, Pending, Step};
pub use value::Value;
pub use words::{CpsFn, DefinedWord, Native, Primitive, ValueFn, Word, WordRegistry};

/// Result type for evaluation; errors are the shared Logo diagnostics.
pub type EvalResult<T> = logo_diagnostic::LogoResult<T>;
