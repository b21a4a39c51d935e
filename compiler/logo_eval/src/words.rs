//! Word registry.
//!
//! Words are either primitives, implemented natively and registered by the
//! host, or procedures defined by `to ... end`. The registry keeps a
//! signature table alongside the words; the parser borrows a snapshot of it
//! for arity lookups, and later definitions copy it on write.

use std::fmt;
use std::rc::Rc;

use logo_ir::{Expr, List, Signature, SignatureTable};
use rustc_hash::FxHashMap;

use crate::{Cont, Env, EvalResult, Machine, Step, Value};

/// A primitive that computes its output directly.
pub type ValueFn = dyn Fn(&mut Machine, &[Value], &Env, &Rc<Expr>) -> EvalResult<Value>;

/// A primitive that takes over the continuation, for control flow that
/// evaluates blocks (`repeat`, `if`).
pub type CpsFn = dyn Fn(&mut Machine, Vec<Value>, &Env, Cont, &Rc<Expr>) -> EvalResult<Step>;

#[derive(Clone)]
pub enum Native {
    Value(Rc<ValueFn>),
    Cps(Rc<CpsFn>),
}

/// A natively implemented word.
pub struct Primitive {
    pub name: String,
    pub narg: usize,
    /// Takes every argument up to `)` when called directly inside parens.
    pub variadic: bool,
    pub native: Native,
}

impl Primitive {
    pub fn value(
        name: impl Into<String>,
        narg: usize,
        f: impl Fn(&mut Machine, &[Value], &Env, &Rc<Expr>) -> EvalResult<Value> + 'static,
    ) -> Self {
        Primitive {
            name: name.into(),
            narg,
            variadic: false,
            native: Native::Value(Rc::new(f)),
        }
    }

    pub fn cps(
        name: impl Into<String>,
        narg: usize,
        f: impl Fn(&mut Machine, Vec<Value>, &Env, Cont, &Rc<Expr>) -> EvalResult<Step> + 'static,
    ) -> Self {
        Primitive {
            name: name.into(),
            narg,
            variadic: false,
            native: Native::Cps(Rc::new(f)),
        }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn signature(&self) -> Signature {
        Signature::Primitive {
            narg: self.narg,
            variadic: self.variadic,
        }
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("narg", &self.narg)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}

/// A procedure defined with `to`.
#[derive(Clone, Debug)]
pub struct DefinedWord {
    pub name: String,
    pub arg_names: Vec<String>,
    pub body: List,
}

#[derive(Clone, Debug)]
pub enum Word {
    Primitive(Rc<Primitive>),
    Defined(Rc<DefinedWord>),
}

impl Word {
    pub fn name(&self) -> &str {
        match self {
            Word::Primitive(p) => &p.name,
            Word::Defined(d) => &d.name,
        }
    }

    pub fn signature(&self) -> Signature {
        match self {
            Word::Primitive(p) => p.signature(),
            Word::Defined(d) => Signature::Defined {
                arg_names: d.arg_names.clone(),
            },
        }
    }
}

/// All words known to a machine.
#[derive(Clone, Debug, Default)]
pub struct WordRegistry {
    words: FxHashMap<String, Word>,
    signatures: Rc<SignatureTable>,
}

impl WordRegistry {
    pub fn new() -> Self {
        WordRegistry::default()
    }

    pub fn get(&self, name: &str) -> Option<&Word> {
        self.words.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.words.contains_key(name)
    }

    /// Register a primitive, replacing any word of the same name.
    pub fn register(&mut self, primitive: Primitive) {
        let name = primitive.name.clone();
        self.insert(name, Word::Primitive(Rc::new(primitive)));
    }

    /// Define (or redefine) a procedure.
    pub fn define(&mut self, word: DefinedWord) {
        let name = word.name.clone();
        self.insert(name, Word::Defined(Rc::new(word)));
    }

    fn insert(&mut self, name: String, word: Word) {
        Rc::make_mut(&mut self.signatures).insert(name.clone(), word.signature());
        self.words.insert(name, word);
    }

    /// Shared snapshot of every word's signature, for the parser.
    pub fn signatures(&self) -> Rc<SignatureTable> {
        Rc::clone(&self.signatures)
    }

    /// Names of user-defined procedures, sorted.
    pub fn defined_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .words
            .values()
            .filter(|w| matches!(w, Word::Defined(_)))
            .map(Word::name)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
