//! Variable scopes.
//!
//! Logo scoping is two-level: the global scope, and one scope per call of a
//! user-defined procedure whose parent is the global scope. A procedure
//! therefore never sees its caller's locals.
//!
//! Scopes are shared between suspended continuations, so they live behind
//! [`LocalScope`], a single-threaded shared cell.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::Value;

/// Single-threaded shared mutable handle (`Rc<RefCell<T>>`).
///
/// All scope allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Variable bindings plus an optional parent.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Env>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: Env) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Binding in this scope only.
    #[inline]
    pub fn get_local(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A handle on a scope chain.
pub type Env = LocalScope<Scope>;

impl Env {
    /// New scope whose parent is `self`.
    pub fn child(&self) -> Env {
        LocalScope::new(Scope::with_parent(self.clone()))
    }

    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.borrow_mut().define(name, value);
    }

    /// Look `name` up along the parent chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut scope = self.clone();
        loop {
            let parent = {
                let current = scope.borrow();
                if let Some(value) = current.get_local(name) {
                    return Some(value.clone());
                }
                current.parent.clone()?
            };
            scope = parent;
        }
    }
}
