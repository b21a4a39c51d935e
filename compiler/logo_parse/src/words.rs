//! Parse-time word table.
//!
//! The registry's signatures are shared read-only through an `Rc`; words
//! defined while parsing go into a local overlay, so a parse never mutates
//! the registry it was given.

use std::rc::Rc;

use logo_ir::{Signature, SignatureTable};

#[derive(Clone, Debug, Default)]
pub struct WordTable {
    base: Rc<SignatureTable>,
    local: SignatureTable,
}

impl WordTable {
    pub fn new(base: Rc<SignatureTable>) -> Self {
        WordTable {
            base,
            local: SignatureTable::default(),
        }
    }

    /// Signature of `name`; words defined during this parse win.
    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.local.get(name).or_else(|| self.base.get(name))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Record a word defined by the input being parsed.
    pub fn define(&mut self, name: impl Into<String>, signature: Signature) {
        self.local.insert(name.into(), signature);
    }

    /// Words defined during this parse.
    pub fn local(&self) -> &SignatureTable {
        &self.local
    }
}
