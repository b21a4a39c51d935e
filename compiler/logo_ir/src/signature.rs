//! Word signatures: the arity information needed at parse time.

use rustc_hash::FxHashMap;

/// What the parser needs to know about a word to parse a call to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signature {
    /// A native word with a fixed argument count. When `variadic` is set, a
    /// call written directly inside parentheses takes every argument up to
    /// the closing paren instead.
    Primitive { narg: usize, variadic: bool },
    /// A user-defined procedure.
    Defined { arg_names: Vec<String> },
}

impl Signature {
    /// Declared argument count.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            Signature::Primitive { narg, .. } => *narg,
            Signature::Defined { arg_names } => arg_names.len(),
        }
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        matches!(self, Signature::Primitive { variadic: true, .. })
    }
}

/// Word name to signature.
pub type SignatureTable = FxHashMap<String, Signature>;
