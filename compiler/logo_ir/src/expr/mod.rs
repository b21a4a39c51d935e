//! Expression trees.
//!
//! `Expr` is a closed set of node kinds. Children are held through `Rc` so
//! the evaluator can keep a handle on a subtree while it is suspended.
//! Editing goes through `Rc::make_mut` (see [`crate::path`]), so a tree that
//! shares nodes with a running evaluation is copied on write rather than
//! changed under it.

use std::fmt;
use std::rc::Rc;

/// Binary operators written infix. Each is sugar for a two-argument core
/// word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Lt,
    Gt,
    Eq,
    Add,
    Sub,
    Mul,
    Div,
}

impl InfixOp {
    /// Operator for an `INFIX-OP` token's text.
    pub fn from_symbol(text: &str) -> Option<Self> {
        match text {
            "<" => Some(InfixOp::Lt),
            ">" => Some(InfixOp::Gt),
            "=" => Some(InfixOp::Eq),
            "+" => Some(InfixOp::Add),
            "-" => Some(InfixOp::Sub),
            "*" => Some(InfixOp::Mul),
            "/" => Some(InfixOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "=",
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
        }
    }

    /// Core word the operator applies.
    pub fn word_name(self) -> &'static str {
        match self {
            InfixOp::Lt => "lt",
            InfixOp::Gt => "gt",
            InfixOp::Eq => "eq",
            InfixOp::Add => "add",
            InfixOp::Sub => "minus",
            InfixOp::Mul => "multiple",
            InfixOp::Div => "divide",
        }
    }

    /// Binding strength. Higher binds tighter; equal priorities associate
    /// to the left.
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            InfixOp::Lt | InfixOp::Gt | InfixOp::Eq => 1,
            InfixOp::Add | InfixOp::Sub => 2,
            InfixOp::Mul | InfixOp::Div => 3,
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Number {
    pub value: i64,
    pub line: u32,
}

/// A quoted word literal (`"abc`). `text` excludes the quote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub line: u32,
}

/// A variable reference (`:x`). `name` excludes the colon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub line: u32,
}

/// A bracketed list. Its items are evaluated only when the list is run as
/// a block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct List {
    pub items: Vec<Rc<Expr>>,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcedureDef {
    pub name: String,
    /// Parameter names, without the colon.
    pub arg_names: Vec<String>,
    pub body: List,
    pub line: u32,
}

/// A call of a word with its (already grouped) arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Apply {
    pub name: String,
    pub args: Vec<Rc<Expr>>,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Infix {
    pub op: InfixOp,
    pub left: Rc<Expr>,
    pub right: Rc<Expr>,
    pub line: u32,
}

/// An explicit parenthesized group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paren {
    pub inner: Rc<Expr>,
    pub line: u32,
}

/// A node of the expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A hole left behind by an edit.
    Nil,
    Number(Number),
    Word(Word),
    Variable(Variable),
    List(List),
    ProcedureDef(ProcedureDef),
    Apply(Apply),
    Infix(Infix),
    Paren(Paren),
}

impl Expr {
    pub fn number(value: i64, line: u32) -> Self {
        Expr::Number(Number { value, line })
    }

    pub fn word(text: impl Into<String>, line: u32) -> Self {
        Expr::Word(Word {
            text: text.into(),
            line,
        })
    }

    pub fn variable(name: impl Into<String>, line: u32) -> Self {
        Expr::Variable(Variable {
            name: name.into(),
            line,
        })
    }

    pub fn list(items: Vec<Expr>, line: u32) -> Self {
        Expr::List(List {
            items: items.into_iter().map(Rc::new).collect(),
            line,
        })
    }

    pub fn apply(name: impl Into<String>, args: Vec<Expr>, line: u32) -> Self {
        Expr::Apply(Apply {
            name: name.into(),
            args: args.into_iter().map(Rc::new).collect(),
            line,
        })
    }

    pub fn infix(op: InfixOp, left: Expr, right: Expr, line: u32) -> Self {
        Expr::Infix(Infix {
            op,
            left: Rc::new(left),
            right: Rc::new(right),
            line,
        })
    }

    pub fn paren(inner: Expr, line: u32) -> Self {
        Expr::Paren(Paren {
            inner: Rc::new(inner),
            line,
        })
    }

    /// Upper-case kind tag, as shown in dumps and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Nil => "NIL",
            Expr::Number(_) => "NUMBER",
            Expr::Word(_) => "WORD",
            Expr::Variable(_) => "VARIABLE",
            Expr::List(_) => "LIST",
            Expr::ProcedureDef(_) => "TO",
            Expr::Apply(_) => "APPLY",
            Expr::Infix(_) => "INFIX",
            Expr::Paren(_) => "PAREN",
        }
    }

    /// Source line of the node. `Nil` has none.
    pub fn line(&self) -> Option<u32> {
        match self {
            Expr::Nil => None,
            Expr::Number(n) => Some(n.line),
            Expr::Word(w) => Some(w.line),
            Expr::Variable(v) => Some(v.line),
            Expr::List(l) => Some(l.line),
            Expr::ProcedureDef(p) => Some(p.line),
            Expr::Apply(a) => Some(a.line),
            Expr::Infix(i) => Some(i.line),
            Expr::Paren(p) => Some(p.line),
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Nil)
    }

    /// Number of directly addressable children (see [`crate::path`]).
    pub fn child_count(&self) -> usize {
        match self {
            Expr::List(l) => l.items.len(),
            Expr::ProcedureDef(p) => p.body.items.len(),
            Expr::Apply(a) => a.args.len(),
            Expr::Infix(_) => 2,
            Expr::Paren(_) => 1,
            Expr::Nil | Expr::Number(_) | Expr::Word(_) | Expr::Variable(_) => 0,
        }
    }

    /// Child at `index`. Infix numbers `left` 0 and `right` 1; procedure
    /// definitions expose their body items.
    pub fn child(&self, index: usize) -> Option<&Rc<Expr>> {
        match self {
            Expr::List(l) => l.items.get(index),
            Expr::ProcedureDef(p) => p.body.items.get(index),
            Expr::Apply(a) => a.args.get(index),
            Expr::Infix(i) => match index {
                0 => Some(&i.left),
                1 => Some(&i.right),
                _ => None,
            },
            Expr::Paren(p) if index == 0 => Some(&p.inner),
            _ => None,
        }
    }

    /// Mutable handle on a child slot. The `Rc` itself is returned so the
    /// caller can either swap the slot or `Rc::make_mut` into it.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Rc<Expr>> {
        match self {
            Expr::List(l) => l.items.get_mut(index),
            Expr::ProcedureDef(p) => p.body.items.get_mut(index),
            Expr::Apply(a) => a.args.get_mut(index),
            Expr::Infix(i) => match index {
                0 => Some(&mut i.left),
                1 => Some(&mut i.right),
                _ => None,
            },
            Expr::Paren(p) if index == 0 => Some(&mut p.inner),
            _ => None,
        }
    }

    /// Whether children live in a sequence, so deleting one removes it
    /// rather than leaving a `Nil` hole.
    #[inline]
    pub fn has_sequence_children(&self) -> bool {
        matches!(self, Expr::List(_) | Expr::ProcedureDef(_))
    }

    /// Structural equality that ignores source lines.
    pub fn same_structure(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Nil, Expr::Nil) => true,
            (Expr::Number(a), Expr::Number(b)) => a.value == b.value,
            (Expr::Word(a), Expr::Word(b)) => a.text == b.text,
            (Expr::Variable(a), Expr::Variable(b)) => a.name == b.name,
            (Expr::List(a), Expr::List(b)) => same_items(&a.items, &b.items),
            (Expr::ProcedureDef(a), Expr::ProcedureDef(b)) => {
                a.name == b.name
                    && a.arg_names == b.arg_names
                    && same_items(&a.body.items, &b.body.items)
            }
            (Expr::Apply(a), Expr::Apply(b)) => a.name == b.name && same_items(&a.args, &b.args),
            (Expr::Infix(a), Expr::Infix(b)) => {
                a.op == b.op && a.left.same_structure(&b.left) && a.right.same_structure(&b.right)
            }
            (Expr::Paren(a), Expr::Paren(b)) => a.inner.same_structure(&b.inner),
            _ => false,
        }
    }
}

/// Element-wise [`Expr::same_structure`] over two sequences.
pub fn same_items<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<Expr>,
    B: AsRef<Expr>,
{
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.as_ref().same_structure(y.as_ref()))
}

impl AsRef<Expr> for Expr {
    fn as_ref(&self) -> &Expr {
        self
    }
}
