//! Expression evaluation in continuation-passing style.
//!
//! # Shape
//!
//! - [`eval`] evaluates one expression and hands its value to `k`.
//!   Self-evaluating nodes, variables and definitions are reduced inline;
//!   calls and infix operations evaluate their arguments as a sequence and
//!   then suspend with an owned [`Step::pending`] that applies the word.
//! - [`eval_list`] evaluates a sequence left to right. Inline nodes are
//!   reduced in place until the first node that suspends; that node is
//!   evaluated with a continuation that stores its value and carries on with
//!   the rest. A sequence that had to suspend finishes with a bounce to the
//!   driver instead of calling its continuation directly, so returning from
//!   deep recursion unwinds one level per driver iteration.
//! - [`eval_block`] runs a list as code; its value is the value of the last
//!   item.

use std::rc::Rc;

use logo_diagnostic::LogoError;
use logo_ir::{export_expr, Expr, Keywords, List};
use logo_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::trampoline::ListCont;
use crate::{Cont, DefinedWord, Env, EvalResult, Machine, Native, Step, Value, Word};

/// A sequence element: not yet evaluated, or already a value.
enum Slot {
    Expr(Rc<Expr>),
    Value(Value),
}

impl Slot {
    fn into_value(self) -> Value {
        match self {
            Slot::Value(value) => value,
            // Every expression slot has been replaced by the time a sequence
            // completes.
            Slot::Expr(_) => Value::Void,
        }
    }
}

/// Result of reducing a node without suspending.
enum Inline {
    Value(Value),
    /// The node is (or wraps, through parens) a call that must suspend.
    Call(Rc<Expr>),
}

/// Evaluate `expr` in `env` and pass its value to `k`.
pub fn eval(m: &mut Machine, expr: &Rc<Expr>, env: &Env, k: Cont) -> EvalResult<Step> {
    match eval_inline(m, expr, env)? {
        Inline::Value(value) => k.call(m, value),
        Inline::Call(call) => eval_call(m, &call, env, k),
    }
}

fn eval_inline(m: &mut Machine, expr: &Rc<Expr>, env: &Env) -> EvalResult<Inline> {
    let value = match &**expr {
        Expr::Nil => Value::Nil,
        Expr::Number(n) => Value::Number(n.value),
        Expr::Word(w) => Value::word(&w.text),
        Expr::Variable(v) => env
            .lookup(&v.name)
            .ok_or_else(|| LogoError::name(v.name.clone(), Some(v.line)))?,
        Expr::List(list) => Value::List(Rc::new(list.clone())),
        Expr::ProcedureDef(def) => {
            debug!(name = %def.name, arity = def.arg_names.len(), "define");
            m.words_mut().define(DefinedWord {
                name: def.name.clone(),
                arg_names: def.arg_names.clone(),
                body: def.body.clone(),
            });
            Value::Void
        }
        Expr::Paren(paren) => return ensure_sufficient_stack(|| eval_inline(m, &paren.inner, env)),
        Expr::Apply(_) | Expr::Infix(_) => return Ok(Inline::Call(Rc::clone(expr))),
    };
    Ok(Inline::Value(value))
}

/// Evaluate `items` in order and pass all their values to `k`.
pub(crate) fn eval_list(
    m: &mut Machine,
    items: &[Rc<Expr>],
    env: &Env,
    k: ListCont,
) -> EvalResult<Step> {
    let slots = items.iter().cloned().map(Slot::Expr).collect();
    continue_list(m, slots, 0, env.clone(), k, false)
}

fn continue_list(
    m: &mut Machine,
    mut slots: Vec<Slot>,
    mut idx: usize,
    env: Env,
    k: ListCont,
    resumed: bool,
) -> EvalResult<Step> {
    let mut suspending = None;
    while idx < slots.len() {
        if let Slot::Expr(expr) = &slots[idx] {
            let expr = Rc::clone(expr);
            match eval_inline(m, &expr, &env)? {
                Inline::Value(value) => slots[idx] = Slot::Value(value),
                Inline::Call(call) => {
                    suspending = Some(call);
                    break;
                }
            }
        }
        idx += 1;
    }

    let Some(call) = suspending else {
        let values: Vec<Value> = slots.into_iter().map(Slot::into_value).collect();
        return if resumed {
            Ok(Step::bounce(move |m| k.call(m, values)))
        } else {
            k.call(m, values)
        };
    };

    let resume_env = env.clone();
    let resume = Cont::new(move |m: &mut Machine, value: Value| {
        slots[idx] = Slot::Value(value);
        continue_list(m, slots, idx + 1, resume_env, k, true)
    });
    eval_call(m, &call, &env, resume)
}

/// Run `list` as code in `env`; its value is that of its last item.
pub fn eval_block(m: &mut Machine, list: &List, env: &Env, k: Cont) -> EvalResult<Step> {
    eval_list(
        m,
        &list.items,
        env,
        Cont::new(move |m: &mut Machine, mut values: Vec<Value>| {
            k.call(m, values.pop().unwrap_or(Value::Void))
        }),
    )
}

/// Evaluate the arguments of a call, then suspend before applying the word.
fn eval_call(m: &mut Machine, call: &Rc<Expr>, env: &Env, k: Cont) -> EvalResult<Step> {
    let owner = Rc::clone(call);
    let call_env = env.clone();
    eval_list(
        m,
        &call_args(call),
        env,
        Cont::new(move |_: &mut Machine, values: Vec<Value>| {
            let call = Rc::clone(&owner);
            Ok(Step::pending(owner, move |m| {
                dispatch(m, &call, values, &call_env, k)
            }))
        }),
    )
}

/// Name of the word a call applies. Infix operators name their core word.
fn word_name(call: &Expr) -> &str {
    match call {
        Expr::Apply(apply) => &apply.name,
        Expr::Infix(infix) => infix.op.word_name(),
        _ => "",
    }
}

fn call_args(call: &Expr) -> Vec<Rc<Expr>> {
    match call {
        Expr::Apply(apply) => apply.args.clone(),
        Expr::Infix(infix) => vec![Rc::clone(&infix.left), Rc::clone(&infix.right)],
        _ => Vec::new(),
    }
}

/// Apply the called word to its evaluated arguments.
fn dispatch(
    m: &mut Machine,
    call: &Rc<Expr>,
    args: Vec<Value>,
    env: &Env,
    k: Cont,
) -> EvalResult<Step> {
    let name = word_name(call);
    let Some(word) = m.words().get(name).cloned() else {
        return Err(LogoError::name(name, call.line()));
    };

    if let Some(pos) = args.iter().position(Value::is_void) {
        let arg_exprs = call_args(call);
        let arg = arg_exprs.get(pos).map_or(&**call, |e| &**e);
        let text = export_expr(arg, &Keywords::default());
        return Err(LogoError::runtime(format!("{text} has no value"), Some(arg)));
    }

    match word {
        Word::Primitive(prim) => {
            if !prim.variadic && args.len() != prim.narg {
                return Err(arity_error(name, prim.narg, args.len(), call));
            }
            match &prim.native {
                Native::Value(f) => {
                    let value = f(m, &args, env, call)?;
                    k.call(m, value)
                }
                Native::Cps(f) => f(m, args, env, k, call),
            }
        }
        Word::Defined(def) => {
            if args.len() != def.arg_names.len() {
                return Err(arity_error(name, def.arg_names.len(), args.len(), call));
            }
            let local = m.globals().child();
            for (arg_name, value) in def.arg_names.iter().zip(args) {
                local.define(arg_name.clone(), value);
            }
            eval_block(m, &def.body, &local, k)
        }
    }
}

fn arity_error(name: &str, expected: usize, got: usize, call: &Expr) -> LogoError {
    LogoError::runtime(
        format!("{name} expects {expected} argument(s), got {got}"),
        Some(call),
    )
}
