//! Logo IR - tokens and expression trees.
//!
//! This crate contains the data structures shared by every stage of the
//! Logo front end:
//! - `Token` and `TokenList` produced by the tokenizer
//! - `Expr`, the tagged expression tree built by the parser
//! - `Signature`, the arity information the parser needs for every word
//! - `Keywords`, the (optionally localized) spelling of `to` / `end`
//! - `ExprPath` and the editing operations that replace parent links
//! - `export`, the serialization of a tree back to source text
//!
//! # Design Philosophy
//!
//! - **Shared children**: child nodes sit behind `Rc`, so a suspended
//!   evaluation can hold on to a subtree cheaply. Edits copy on write. There
//!   are no parent back-references; an editor addresses a node by its path
//!   from a top-level expression instead.
//! - **Lines, not spans**: the only position information kept is the 0-based
//!   source line, which is all error reports need.

mod export;
mod expr;
mod keywords;
pub mod path;
mod signature;
mod token;

pub use export::{export, export_expr};
pub use expr::{
    same_items, Apply, Expr, Infix, InfixOp, List, Number, Paren, ProcedureDef, Variable, Word,
};
pub use keywords::Keywords;
pub use path::ExprPath;
pub use signature::{Signature, SignatureTable};
pub use token::{Token, TokenKind, TokenList};
