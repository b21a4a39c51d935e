//! Continuation-passing plumbing.
//!
//! Every evaluation function takes a continuation and returns a [`Step`]:
//! either the final value of the whole session, or a [`Pending`] reduction
//! that the driver must resume later. Nothing that can repeat without bound
//! is done by host recursion; it is handed back to the driver as a
//! `Pending` instead, so the host stack stays flat however deep the Logo
//! program recurses.
//!
//! A `Pending` may have an owner: the call or infix expression whose word
//! is about to be applied. Owned reductions are the externally visible
//! steps. Owner-less ones are bookkeeping (finishing a sequence, looping a
//! `repeat`) and the driver runs through them without stopping.
//!
//! Each level of Logo recursion wraps the caller's continuation in another
//! [`Cont`]. Dropping a suspended session must not walk that chain on the
//! host stack, so a dropped `Cont` hands its closure to a per-thread release
//! list that the outermost drop drains in a loop.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use logo_diagnostic::LogoError;
use logo_ir::Expr;

use crate::{EvalResult, Machine, Value};

type ContFn<T> = dyn FnOnce(&mut Machine, T) -> EvalResult<Step>;

/// What to do with the value of an expression.
pub struct Cont<T: 'static = Value>(Option<Box<ContFn<T>>>);

/// What to do with the values of a sequence.
pub(crate) type ListCont = Cont<Vec<Value>>;

impl<T: 'static> Cont<T> {
    pub fn new(f: impl FnOnce(&mut Machine, T) -> EvalResult<Step> + 'static) -> Self {
        Cont(Some(Box::new(f)))
    }

    /// Hand `value` to the continuation.
    pub fn call(mut self, machine: &mut Machine, value: T) -> EvalResult<Step> {
        match self.0.take() {
            Some(f) => f(machine, value),
            None => Err(LogoError::runtime("continuation already consumed", None)),
        }
    }
}

impl<T: 'static> Drop for Cont<T> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            release(Box::new(f));
        }
    }
}

impl<T: 'static> fmt::Debug for Cont<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cont")
    }
}

thread_local! {
    /// Closures of dropped continuations, waiting to be freed.
    static RELEASED: RefCell<Vec<Box<dyn Any>>> = const { RefCell::new(Vec::new()) };

    /// Whether some frame on this thread is already draining `RELEASED`.
    static DRAINING: Cell<bool> = const { Cell::new(false) };
}

/// Free `captured` without recursing into the continuations it holds.
///
/// Freeing a closure drops the `Cont`s it captured, which land back here
/// and are picked up by the loop instead of being freed in place.
fn release(captured: Box<dyn Any>) {
    let Ok(draining) = DRAINING.try_with(Cell::get) else {
        // Thread teardown: free in place.
        return;
    };
    if RELEASED.try_with(move |list| list.borrow_mut().push(captured)).is_err() || draining {
        return;
    }
    DRAINING.with(|d| d.set(true));
    while let Some(next) = RELEASED.with(|list| list.borrow_mut().pop()) {
        drop(next);
    }
    DRAINING.with(|d| d.set(false));
}

type Resume = Box<dyn FnOnce(&mut Machine) -> EvalResult<Step>>;

/// Outcome of one unit of evaluation.
pub enum Step {
    Done(Value),
    Pending(Pending),
}

impl Step {
    /// A visible step owned by `owner`.
    pub fn pending(owner: Rc<Expr>, resume: impl FnOnce(&mut Machine) -> EvalResult<Step> + 'static) -> Self {
        Step::Pending(Pending {
            owner: Some(owner),
            resume: Box::new(resume),
        })
    }

    /// A bookkeeping step that returns control to the driver.
    pub fn bounce(resume: impl FnOnce(&mut Machine) -> EvalResult<Step> + 'static) -> Self {
        Step::Pending(Pending {
            owner: None,
            resume: Box::new(resume),
        })
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Done(value) => f.debug_tuple("Done").field(value).finish(),
            Step::Pending(pending) => f.debug_tuple("Pending").field(pending).finish(),
        }
    }
}

/// A suspended reduction.
pub struct Pending {
    owner: Option<Rc<Expr>>,
    resume: Resume,
}

impl Pending {
    /// Expression whose word this reduction applies, if any.
    pub fn owner(&self) -> Option<&Rc<Expr>> {
        self.owner.as_ref()
    }

    #[inline]
    pub fn is_bookkeeping(&self) -> bool {
        self.owner.is_none()
    }

    pub(crate) fn resume(self, machine: &mut Machine) -> EvalResult<Step> {
        (self.resume)(machine)
    }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("owner", &self.owner.as_deref().map(Expr::kind_name))
            .finish_non_exhaustive()
    }
}
