//! Session driver.
//!
//! A [`Machine`] is the context object every run goes through: it owns the
//! word registry, the global scope and the print handler, and holds the one
//! evaluation session that is currently in flight.
//!
//! # Session Lifecycle
//!
//! ```text
//! Idle --start--> Pending --step--> ... --> Completed(value)
//!                    |                   \-> Errored(error)
//!                    \--run_to_completion--^
//! ```
//!
//! [`Machine::step`] and [`Machine::run_to_completion`] advance through the
//! same routine: resume the waiting reduction, then run every bookkeeping
//! reduction that follows until the next owned one. Stepping and running
//! therefore visit the same reductions in the same order.

use std::mem;
use std::rc::Rc;

use logo_diagnostic::LogoError;
use logo_ir::Expr;
use tracing::{debug, trace};

use crate::eval::eval_list;
use crate::{
    register_core_words, stdout_handler, Cont, Env, EvalResult, Pending, SharedPrintHandler, Step,
    Value, WordRegistry,
};

/// Externally visible state of the current session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing started yet, or the machine was reset.
    Idle,
    /// A reduction is waiting for the next `step`.
    Pending,
    Completed,
    Errored,
}

enum Session {
    Idle,
    Pending(Pending),
    Completed(Value),
    Errored(LogoError),
}

pub struct Machine {
    words: WordRegistry,
    globals: Env,
    printer: SharedPrintHandler,
    session: Session,
    /// Owner of the reduction that is waiting, or that failed.
    current: Option<Rc<Expr>>,
    steps: u64,
}

impl Machine {
    /// A machine with the core words, printing through `printer`.
    pub fn new(printer: SharedPrintHandler) -> Self {
        let mut words = WordRegistry::new();
        register_core_words(&mut words);
        Machine {
            words,
            globals: Env::default(),
            printer,
            session: Session::Idle,
            current: None,
            steps: 0,
        }
    }

    pub fn words(&self) -> &WordRegistry {
        &self.words
    }

    /// Mutable registry, for hosts adding their own primitives.
    pub fn words_mut(&mut self) -> &mut WordRegistry {
        &mut self.words
    }

    pub fn globals(&self) -> &Env {
        &self.globals
    }

    pub fn printer(&self) -> &SharedPrintHandler {
        &self.printer
    }

    /// Begin a session over `program`, replacing any session in flight.
    ///
    /// Evaluation runs up to the first visible reduction; a program with no
    /// calls completes (or fails) right here.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn start(&mut self, program: &[Expr]) {
        self.session = Session::Idle;
        self.current = None;
        self.steps = 0;

        let items: Vec<Rc<Expr>> = program.iter().cloned().map(Rc::new).collect();
        debug!(exprs = items.len(), "session start");
        let globals = self.globals.clone();
        let outcome = eval_list(
            self,
            &items,
            &globals,
            Cont::new(|_: &mut Machine, mut values: Vec<Value>| {
                Ok(Step::Done(values.pop().unwrap_or(Value::Void)))
            }),
        );
        self.settle(outcome);
    }

    /// Perform one visible reduction. Returns whether the session is still
    /// pending afterwards.
    pub fn step(&mut self) -> bool {
        match mem::replace(&mut self.session, Session::Idle) {
            Session::Pending(pending) => {
                self.steps += 1;
                let outcome = pending.resume(self);
                self.settle(outcome);
                self.is_pending()
            }
            other => {
                self.session = other;
                false
            }
        }
    }

    /// Step until the session completes or fails.
    ///
    /// With a budget, a session still pending after `max_steps` reductions
    /// fails with a runtime error.
    pub fn run_to_completion(&mut self, max_steps: Option<u64>) -> SessionState {
        while self.is_pending() {
            if max_steps.is_some_and(|max| self.steps >= max) {
                debug!(steps = self.steps, "step budget exhausted");
                self.session = Session::Errored(LogoError::runtime(
                    "step budget exhausted",
                    self.current.as_deref(),
                ));
                break;
            }
            self.step();
        }
        self.state()
    }

    /// Run bookkeeping reductions until an owned one is waiting, or the
    /// session is over.
    fn settle(&mut self, mut outcome: EvalResult<Step>) {
        loop {
            match outcome {
                Ok(Step::Pending(pending)) if pending.is_bookkeeping() => {
                    outcome = pending.resume(self);
                }
                Ok(Step::Pending(pending)) => {
                    self.current = pending.owner().cloned();
                    if let Some(owner) = &self.current {
                        trace!(
                            step = self.steps,
                            expr = owner.kind_name(),
                            line = ?owner.line(),
                            "pending"
                        );
                    }
                    self.session = Session::Pending(pending);
                    return;
                }
                Ok(Step::Done(value)) => {
                    debug!(steps = self.steps, %value, "session completed");
                    self.current = None;
                    self.session = Session::Completed(value);
                    return;
                }
                Err(err) => {
                    debug!(steps = self.steps, error = %err, "session failed");
                    self.session = Session::Errored(err);
                    return;
                }
            }
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.session, Session::Pending(_))
    }

    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Idle => SessionState::Idle,
            Session::Pending(_) => SessionState::Pending,
            Session::Completed(_) => SessionState::Completed,
            Session::Errored(_) => SessionState::Errored,
        }
    }

    /// Final value of a completed session.
    pub fn result(&self) -> Option<&Value> {
        match &self.session {
            Session::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Error that ended the session.
    pub fn error(&self) -> Option<&LogoError> {
        match &self.session {
            Session::Errored(err) => Some(err),
            _ => None,
        }
    }

    /// Expression whose word is applied by the next `step`.
    pub fn current_expression(&self) -> Option<&Expr> {
        self.current.as_deref()
    }

    /// Visible reductions performed in this session.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Drop the session, every defined word and every global variable.
    /// Host primitives registered after construction are dropped too.
    pub fn reset(&mut self) {
        debug!("machine reset");
        let mut words = WordRegistry::new();
        register_core_words(&mut words);
        self.words = words;
        self.globals = Env::default();
        self.session = Session::Idle;
        self.current = None;
        self.steps = 0;
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new(stdout_handler())
    }
}

#[cfg(test)]
mod tests;
