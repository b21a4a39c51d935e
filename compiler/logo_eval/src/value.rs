//! Runtime values.

use std::fmt;
use std::rc::Rc;

use logo_ir::{export_expr, Expr, Keywords, List};

/// Result of evaluating an expression.
#[derive(Clone, Debug)]
pub enum Value {
    /// No value: the result of a definition or of a command such as
    /// `print`. Passing it as an argument is an error.
    Void,
    /// An evaluated `Nil` hole.
    Nil,
    Number(i64),
    Word(Rc<str>),
    /// A list literal. Its items stay unevaluated until it is run as a block.
    List(Rc<List>),
}

impl Value {
    pub fn word(text: &str) -> Self {
        Value::Word(Rc::from(text))
    }

    pub fn boolean(b: bool) -> Self {
        Value::word(if b { "true" } else { "false" })
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Rc<List>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// `true` / `false` words as booleans.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Word(w) if &**w == "true" => Some(true),
            Value::Word(w) if &**w == "false" => Some(false),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "nothing",
            Value::Nil => "nil",
            Value::Number(_) => "number",
            Value::Word(_) => "word",
            Value::List(_) => "list",
        }
    }

    /// Value equality as seen by `eq`: lists compare by structure, source
    /// lines ignored.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Nil, Value::Nil) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Word(a), Value::Word(b)) => a == b,
            (Value::List(a), Value::List(b)) => logo_ir::same_items(&a.items, &b.items),
            _ => false,
        }
    }

    /// The literal expression that evaluates back to this value. `Void`
    /// has none.
    pub fn to_expr(&self, line: u32) -> Option<Expr> {
        match self {
            Value::Void => None,
            Value::Nil => Some(Expr::Nil),
            Value::Number(n) => Some(Expr::number(*n, line)),
            Value::Word(w) => Some(Expr::word(&**w, line)),
            Value::List(list) => Some(Expr::List((**list).clone())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void | Value::Nil => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Word(w) => f.write_str(w),
            Value::List(list) => {
                // Print lists with their items as written, brackets included.
                let expr = Expr::List((**list).clone());
                f.write_str(&export_expr(&expr, &Keywords::default()))
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}
