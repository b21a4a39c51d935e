//! Addressing and editing nodes of a program.
//!
//! A program is a sequence of top-level expressions. An [`ExprPath`] is the
//! index of a top-level expression followed by child indices (see
//! [`Expr::child`]). Paths replace parent back-references: an editor finds
//! the parent of a node by dropping the last index.
//!
//! # Editing
//!
//! - [`replace`] swaps a node for another one.
//! - [`delete`] removes a node. Inside a sequence (the program, a list, a
//!   procedure body) the node is removed; inside a call, an infix operation
//!   or a paren group it is replaced with [`Expr::Nil`].

use std::fmt;
use std::rc::Rc;

use crate::Expr;

/// Location of a node within a program.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprPath {
    indices: Vec<usize>,
}

impl ExprPath {
    /// Path of the top-level expression at `index`.
    pub fn top(index: usize) -> Self {
        ExprPath {
            indices: vec![index],
        }
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        ExprPath { indices }
    }

    /// Path of child `index` of the node at `self`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        ExprPath { indices }
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Path of the enclosing node, or `None` for top-level expressions.
    pub fn parent(&self) -> Option<ExprPath> {
        match self.indices.len() {
            0 | 1 => None,
            n => Some(ExprPath {
                indices: self.indices[..n - 1].to_vec(),
            }),
        }
    }

    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.indices.len() == 1
    }
}

impl fmt::Display for ExprPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Node at `path`, if the path is valid.
pub fn get<'a>(program: &'a [Expr], path: &ExprPath) -> Option<&'a Expr> {
    let (first, rest) = path.indices.split_first()?;
    let mut node = program.get(*first)?;
    for &index in rest {
        node = &**node.child(index)?;
    }
    Some(node)
}

/// Mutable access to the node at `path`. Shared nodes on the way down are
/// copied first.
pub fn get_mut<'a>(program: &'a mut [Expr], path: &ExprPath) -> Option<&'a mut Expr> {
    let (first, rest) = path.indices.split_first()?;
    let mut node = program.get_mut(*first)?;
    for &index in rest {
        node = Rc::make_mut(node.child_mut(index)?);
    }
    Some(node)
}

/// Replace the node at `path`, returning the old node.
pub fn replace(program: &mut [Expr], path: &ExprPath, new: Expr) -> Option<Expr> {
    let slot = get_mut(program, path)?;
    Some(std::mem::replace(slot, new))
}

/// Delete the node at `path`, returning it.
pub fn delete(program: &mut Vec<Expr>, path: &ExprPath) -> Option<Expr> {
    let Some(parent_path) = path.parent() else {
        let index = *path.indices.first()?;
        return (index < program.len()).then(|| program.remove(index));
    };
    let index = *path.indices.last()?;
    let parent = get_mut(program, &parent_path)?;
    if !parent.has_sequence_children() {
        let slot = parent.child_mut(index)?;
        return Some(Rc::unwrap_or_clone(std::mem::replace(slot, Rc::new(Expr::Nil))));
    }
    let items = match parent {
        Expr::List(list) => &mut list.items,
        Expr::ProcedureDef(def) => &mut def.body.items,
        _ => return None,
    };
    (index < items.len()).then(|| Rc::unwrap_or_clone(items.remove(index)))
}

/// Every node path in the program, in pre-order.
pub fn paths(program: &[Expr]) -> Vec<ExprPath> {
    let mut out = Vec::new();
    // Explicit stack; children pushed in reverse to keep pre-order.
    let mut stack: Vec<(ExprPath, &Expr)> = program
        .iter()
        .enumerate()
        .rev()
        .map(|(i, e)| (ExprPath::top(i), e))
        .collect();
    while let Some((path, node)) = stack.pop() {
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push((path.child(i), &**child));
            }
        }
        out.push(path);
    }
    out
}
