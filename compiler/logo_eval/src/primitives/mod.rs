//! Words every machine starts with.
//!
//! - `add`, `minus`, `multiple`, `divide`, `lt`, `gt`, `eq`: the targets of
//!   the infix operators
//! - `sum`, `list`: variadic inside parentheses
//! - `repeat`, `if`, `ifelse`: control flow over blocks
//! - `print`
//!
//! Drawing and other host words are registered by the embedder.

use std::rc::Rc;

use logo_diagnostic::LogoError;
use logo_ir::{Expr, List};

use crate::eval::eval_block;
use crate::{Cont, Env, EvalResult, Machine, Primitive, Step, Value, WordRegistry};

pub fn register_core_words(words: &mut WordRegistry) {
    words.register(arithmetic("add", i64::checked_add));
    words.register(arithmetic("minus", i64::checked_sub));
    words.register(arithmetic("multiple", i64::checked_mul));
    words.register(Primitive::value("divide", 2, |_, args, _, call| {
        let (a, b) = two_numbers("divide", args, call)?;
        if b == 0 {
            return Err(LogoError::runtime("division by zero", Some(&**call)));
        }
        a.checked_div(b)
            .map(Value::Number)
            .ok_or_else(|| overflow(call))
    }));
    words.register(comparison("lt", |a, b| a < b));
    words.register(comparison("gt", |a, b| a > b));
    words.register(Primitive::value("eq", 2, |_, args, _, _| {
        Ok(Value::boolean(args[0].equals(&args[1])))
    }));

    words.register(
        Primitive::value("sum", 2, |_, args, _, call| {
            args.iter()
                .try_fold(0_i64, |total, arg| {
                    let n = number("sum", arg, call)?;
                    total.checked_add(n).ok_or_else(|| overflow(call))
                })
                .map(Value::Number)
        })
        .variadic(),
    );
    words.register(
        Primitive::value("list", 2, |_, args, _, call| {
            let line = call.line().unwrap_or(0);
            let items = args
                .iter()
                .filter_map(|arg| arg.to_expr(line))
                .map(Rc::new)
                .collect();
            Ok(Value::List(Rc::new(List { items, line })))
        })
        .variadic(),
    );

    words.register(Primitive::cps("repeat", 2, |m, args, env, k, call| {
        let count = number("repeat", &args[0], call)?;
        let block = list_arg("repeat", &args[1], call)?;
        repeat(m, block, env.clone(), count, k)
    }));
    words.register(Primitive::cps("if", 2, |m, args, env, k, call| {
        let cond = condition("if", &args[0], call)?;
        let block = list_arg("if", &args[1], call)?;
        if cond {
            eval_block(m, &block, env, k)
        } else {
            k.call(m, Value::Void)
        }
    }));
    words.register(Primitive::cps("ifelse", 3, |m, args, env, k, call| {
        let cond = condition("ifelse", &args[0], call)?;
        let then = list_arg("ifelse", &args[1], call)?;
        let otherwise = list_arg("ifelse", &args[2], call)?;
        eval_block(m, if cond { &then } else { &otherwise }, env, k)
    }));

    words.register(Primitive::value("print", 1, |m, args, _, _| {
        m.printer().println(&args[0].to_string());
        Ok(Value::Void)
    }));
}

/// Run `block` `remaining` more times. Each iteration ends with a bounce
/// so loops never nest on the host stack.
fn repeat(m: &mut Machine, block: Rc<List>, env: Env, remaining: i64, k: Cont) -> EvalResult<Step> {
    if remaining <= 0 {
        return k.call(m, Value::Void);
    }
    let next_block = Rc::clone(&block);
    let next_env = env.clone();
    eval_block(
        m,
        &block,
        &env,
        Cont::new(move |_: &mut Machine, _: Value| {
            Ok(Step::bounce(move |m| {
                repeat(m, next_block, next_env, remaining - 1, k)
            }))
        }),
    )
}

fn arithmetic(name: &'static str, op: fn(i64, i64) -> Option<i64>) -> Primitive {
    Primitive::value(name, 2, move |_, args, _, call| {
        let (a, b) = two_numbers(name, args, call)?;
        op(a, b).map(Value::Number).ok_or_else(|| overflow(call))
    })
}

fn comparison(name: &'static str, op: fn(i64, i64) -> bool) -> Primitive {
    Primitive::value(name, 2, move |_, args, _, call| {
        let (a, b) = two_numbers(name, args, call)?;
        Ok(Value::boolean(op(a, b)))
    })
}

fn overflow(call: &Expr) -> LogoError {
    LogoError::runtime("integer overflow", Some(call))
}

fn number(name: &str, value: &Value, call: &Expr) -> EvalResult<i64> {
    value.as_number().ok_or_else(|| {
        LogoError::runtime(
            format!("{name} expects a number, got {}", value.type_name()),
            Some(call),
        )
    })
}

fn two_numbers(name: &str, args: &[Value], call: &Expr) -> EvalResult<(i64, i64)> {
    match args {
        [a, b] => Ok((number(name, a, call)?, number(name, b, call)?)),
        _ => Err(LogoError::runtime(
            format!("{name} expects 2 argument(s), got {}", args.len()),
            Some(call),
        )),
    }
}

fn list_arg(name: &str, value: &Value, call: &Expr) -> EvalResult<Rc<List>> {
    value.as_list().cloned().ok_or_else(|| {
        LogoError::runtime(
            format!("{name} expects a list, got {}", value.type_name()),
            Some(call),
        )
    })
}

fn condition(name: &str, value: &Value, call: &Expr) -> EvalResult<bool> {
    value.as_bool().ok_or_else(|| {
        LogoError::runtime(
            format!("{name} expects true or false, got {}", value.type_name()),
            Some(call),
        )
    })
}
